use anyhow::Context;
use chrono::NaiveDate;
use contracts::shared::stock_report::StockReport;
use std::path::{Path, PathBuf};

/// Записать листы отчёта в каталог `dir`.
///
/// Имена файлов: `stock_YYYY-MM-DD.csv`, `stock_summary_YYYY-MM-DD.csv`,
/// `stock_recommendations_YYYY-MM-DD.csv` (последний только при наличии
/// товаров с низким остатком). Файлы за тот же день перезаписываются.
pub fn write_report(dir: &Path, date: NaiveDate, report: &StockReport) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create report directory {}", dir.display()))?;

    let day = date.format("%Y-%m-%d");
    let mut sheets = vec![
        (format!("stock_{}.csv", day), &report.stock),
        (format!("stock_summary_{}.csv", day), &report.summary),
    ];
    if let Some(recommendations) = &report.recommendations {
        sheets.push((format!("stock_recommendations_{}.csv", day), recommendations));
    }

    let mut written = Vec::with_capacity(sheets.len());
    for (name, content) in sheets {
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Cannot write report file {}", path.display()))?;
        tracing::debug!("Report written: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report_without_recommendations() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");
        let report = StockReport {
            stock: "\u{FEFF}ID\n".to_string(),
            summary: "\u{FEFF}Показатель;Значение\n".to_string(),
            recommendations: None,
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let files = write_report(&dir, date, &report).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("stock_2024-03-09.csv"));
        assert!(files[1].ends_with("stock_summary_2024-03-09.csv"));
        assert_eq!(std::fs::read_to_string(&files[1]).unwrap(), report.summary);
    }
}
