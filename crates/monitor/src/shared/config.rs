use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub monitor: MonitorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub interval_secs: u64,
    pub report_dir: String,
    pub log_dir: String,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3000"
token = ""
timeout_secs = 30

[monitor]
interval_secs = 900
report_dir = "reports"
log_dir = "logs"
"#;

/// Find config.toml
///
/// Search order:
/// 1. Explicit path from the command line
/// 2. Next to the executable
/// 3. None (embedded default config is used)
pub fn locate_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    config_path.exists().then_some(config_path)
}

/// Load configuration; `None` means the embedded default
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Cannot read config {}: {}", path.display(), e))?;
            toml::from_str(&contents)?
        }
        None => toml::from_str(DEFAULT_CONFIG)?,
    };
    Ok(config)
}

/// Resolve a configured directory
/// Relative paths are resolved relative to the executable directory
pub fn resolve_dir(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.monitor.interval_secs, 900);
        assert_eq!(config.monitor.report_dir, "reports");
    }

    #[test]
    fn test_timeout_defaults_when_omitted() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://stock.example.com"

            [monitor]
            interval_secs = 60
            report_dir = "/var/lib/stock/reports"
            log_dir = "/var/log/stock"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.token.is_empty());
        assert_eq!(
            resolve_dir(&config.monitor.report_dir),
            PathBuf::from("/var/lib/stock/reports")
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/stock-monitor.toml")));
        assert!(result.is_err());
    }
}
