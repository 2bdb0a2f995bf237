use clap::Parser;
use std::path::PathBuf;
use stock_monitor::shared::api_client::RestInventoryApi;
use stock_monitor::shared::config::{load_config, locate_config, resolve_dir};
use stock_monitor::system::{tracing as logging, worker};
use stock_monitor::usecases::u101_low_stock_check::StockMonitor;

#[derive(Parser, Debug)]
#[command(name = "stock-monitor", version, about = "Periodic low-stock check and CSV stock reports")]
struct Cli {
    /// Path to config.toml (default: next to the executable, else built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single check and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = locate_config(cli.config.as_deref());
    let config = load_config(config_path.as_deref())?;

    logging::initialize(&resolve_dir(&config.monitor.log_dir))?;
    match &config_path {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::info!("Using built-in default configuration"),
    }
    tracing::info!("API base URL: {}", config.api.base_url);

    let api = RestInventoryApi::new(&config.api)?;
    let monitor = StockMonitor::new(api, resolve_dir(&config.monitor.report_dir));

    if cli.once {
        let summary = monitor.run_cycle(chrono::Utc::now()).await?;
        tracing::info!(
            "Single check done: {} products, {} low stock, {} files",
            summary.product_count,
            summary.low_stock.len(),
            summary.files.len()
        );
        return Ok(());
    }

    worker::run_loop(&monitor, config.monitor.interval_secs).await;
    Ok(())
}
