use serde::{Deserialize, Serialize};

/// Период отчёта по продажам
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl Default for ReportPeriod {
    fn default() -> Self {
        ReportPeriod::Month
    }
}

impl ReportPeriod {
    /// Глубина выборки в днях (параметр `days` запроса продаж)
    pub fn days(&self) -> u32 {
        match self {
            ReportPeriod::Day => 1,
            ReportPeriod::Week => 7,
            ReportPeriod::Month => 30,
            ReportPeriod::Year => 365,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "Последние 24 часа",
            ReportPeriod::Week => "Последние 7 дней",
            ReportPeriod::Month => "Последние 30 дней",
            ReportPeriod::Year => "Последний год",
        }
    }

    pub fn all() -> Vec<ReportPeriod> {
        vec![
            ReportPeriod::Day,
            ReportPeriod::Week,
            ReportPeriod::Month,
            ReportPeriod::Year,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_and_codes() {
        assert_eq!(ReportPeriod::default().days(), 30);
        assert_eq!(ReportPeriod::from_code("week"), Some(ReportPeriod::Week));
        assert_eq!(ReportPeriod::from_code("decade"), None);
        let days: Vec<u32> = ReportPeriod::all().iter().map(|p| p.days()).collect();
        assert_eq!(days, vec![1, 7, 30, 365]);
    }
}
