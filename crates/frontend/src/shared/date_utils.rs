/// Utilities for date and time formatting
///
/// Форматирование берётся из contracts, здесь только привязка к текущему времени браузера
use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a007_notification::relative_time;

pub use contracts::domain::common::timestamp::{format_date, format_datetime, format_datetime_or_never};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

/// "5 мин назад" относительно текущего момента
pub fn format_relative(timestamp: DateTime<Utc>) -> String {
    relative_time(timestamp, now())
}

/// Дата для подписи столбца графика: "15.03"
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}
