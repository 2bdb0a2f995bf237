//! Формирование CSV для выгрузки в Excel.
//!
//! Только форматирование: сохранение файла делает вызывающая сторона
//! (скачивание в браузере или запись на диск).

use chrono::NaiveDate;
use std::borrow::Cow;
use thiserror::Error;

pub const CSV_DELIMITER: &str = ";";

/// Trait для типов, которые могут быть экспортированы в Excel
pub trait ExcelExportable {
    /// Возвращает массив заголовков колонок
    fn headers() -> Vec<&'static str>;

    /// Преобразует объект в массив значений для CSV
    fn to_csv_row(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Нет данных для экспорта")]
    Empty,
    #[error("Не удалось сохранить файл: {0}")]
    Save(String),
}

/// CSV с UTF-8 BOM (иначе Excel ломает кириллицу), разделитель `;`
pub fn render_csv<T: ExcelExportable>(data: &[T]) -> Result<String, ExportError> {
    if data.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut csv_content = String::new();
    csv_content.push('\u{FEFF}');
    csv_content.push_str(&T::headers().join(CSV_DELIMITER));
    csv_content.push('\n');

    for item in data {
        let row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell).into_owned())
            .collect();
        csv_content.push_str(&row.join(CSV_DELIMITER));
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Экранирует CSV ячейку если необходимо
pub fn escape_csv_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([';', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// `relatorio_estoque` + дата → `relatorio_estoque_15-03-2024.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%d-%m-%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, i64);

    impl ExcelExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Товар", "Остаток"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_render_with_bom_and_escaping() {
        let csv = render_csv(&[Row("Smart TV LG 50\"", 8), Row("Кабель; 2м", 3)]).unwrap();
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "Товар;Остаток");
        assert_eq!(lines[1], "\"Smart TV LG 50\"\"\";8");
        assert_eq!(lines[2], "\"Кабель; 2м\";3");
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render_csv(&rows), Err(ExportError::Empty));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(export_file_name("stock", date), "stock_05-03-2024.csv");
    }
}
