//! Разбор временных меток из ответов бэкенда.
//!
//! Бэкенд отдаёт ISO-8601 как с часовым поясом (`2024-03-15T14:02:26Z`),
//! так и без него (`2024-03-15T14:02:26.123456`). Метки без пояса считаются UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Разобрать временную метку в UTC
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Формат для таблиц и отчётов: DD.MM.YYYY HH:MM:SS
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// DD.MM.YYYY
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y").to_string()
}

/// Для необязательных меток: «Никогда», если синхронизации не было
pub fn format_datetime_or_never(dt: Option<&DateTime<Utc>>) -> String {
    dt.map_or_else(|| "Никогда".to_string(), format_datetime)
}

/// `#[serde(with = "serde_timestamp")]`
pub mod serde_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
    }
}

/// То же для необязательных полей; `null` и пустая строка дают `None`.
pub mod serde_timestamp_opt {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_timestamp(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_naive_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(parse_timestamp("2024-03-15T14:02:26"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-15T14:02:26.123456").map(|d| d.timestamp()),
            Some(expected.timestamp())
        );
    }

    #[test]
    fn test_parse_with_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 11, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-15T14:00:00+03:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15T11:00:00Z"), Some(expected));
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 3).unwrap();
        assert_eq!(format_datetime(&dt), "05.03.2024 09:07:03");
        assert_eq!(format_date(&dt), "05.03.2024");
        assert_eq!(format_datetime_or_never(None), "Никогда");
    }

    #[test]
    fn test_parse_date_only_and_garbage() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-15"), Some(expected));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("вчера"), None);
    }
}
