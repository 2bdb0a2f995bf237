use crate::domain::a001_product::ProductId;
use crate::shared::validation::{validate_email, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Глобальная настройка оповещений о низком остатке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub enabled: bool,
    /// Порог: остаток ≤ порога считается низким
    pub threshold: i64,
    #[serde(rename = "notificationEmail", alias = "notification_email", default)]
    pub notification_email: String,
    #[serde(rename = "notificationDashboard", alias = "notification_dashboard", default = "default_true")]
    pub notification_dashboard: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 5,
            notification_email: String::new(),
            notification_dashboard: true,
        }
    }
}

impl AlertSettings {
    /// Проверка формы перед сохранением
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.threshold < 1 {
            return Err(ValidationError::ThresholdBelowOne);
        }
        validate_email(&self.notification_email)
    }

    /// Форма, если она проходит проверку, иначе последняя проверенная версия.
    ///
    /// Недописанный порог не попадает в новые настройки товаров и в расчёт низкого остатка.
    pub fn or_last_valid(self, last_valid: &AlertSettings) -> AlertSettings {
        match self.validate() {
            Ok(()) => self,
            Err(_) => last_valid.clone(),
        }
    }
}

/// Настройка конкретного товара; порог может быть не задан (поле очищено)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOverride {
    pub enabled: bool,
    #[serde(default)]
    pub threshold: Option<i64>,
    #[serde(rename = "notificationEmail", alias = "notification_email", default)]
    pub notification_email: String,
    #[serde(rename = "notificationDashboard", alias = "notification_dashboard", default = "default_true")]
    pub notification_dashboard: bool,
}

impl From<&AlertSettings> for AlertOverride {
    fn from(global: &AlertSettings) -> Self {
        Self {
            enabled: global.enabled,
            threshold: Some(global.threshold),
            notification_email: global.notification_email.clone(),
            notification_dashboard: global.notification_dashboard,
        }
    }
}

/// Изменение одного поля настройки товара
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertField {
    Enabled(bool),
    Threshold(Option<i64>),
    NotificationEmail(String),
    NotificationDashboard(bool),
}

impl AlertOverride {
    pub fn apply(&mut self, field: AlertField) {
        match field {
            AlertField::Enabled(v) => self.enabled = v,
            AlertField::Threshold(v) => self.threshold = v,
            AlertField::NotificationEmail(v) => self.notification_email = v,
            AlertField::NotificationDashboard(v) => self.notification_dashboard = v,
        }
    }
}

/// Настройки по товарам
pub type AlertOverrides = BTreeMap<ProductId, AlertOverride>;

/// Тело GET/POST /api/alerts/settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertSettingsDto {
    #[serde(default)]
    pub global: AlertSettings,
    #[serde(default)]
    pub products: AlertOverrides,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let global = AlertSettings::default();
        assert!(global.enabled);
        assert_eq!(global.threshold, 5);
        assert!(global.notification_email.is_empty());
        assert!(global.notification_dashboard);
    }

    #[test]
    fn test_unfinished_form_falls_back_to_last_valid() {
        let saved = AlertSettings { threshold: 7, ..AlertSettings::default() };
        let editing = AlertSettings { threshold: 0, ..AlertSettings::default() };
        assert_eq!(editing.or_last_valid(&saved), saved);

        let edited = AlertSettings { threshold: 3, ..AlertSettings::default() };
        assert_eq!(edited.clone().or_last_valid(&saved), edited);
    }

    #[test]
    fn test_json_names_and_snake_case_alias() {
        let json = serde_json::to_value(AlertSettings::default()).unwrap();
        assert_eq!(json["notificationEmail"], "");
        assert_eq!(json["notificationDashboard"], true);

        let parsed: AlertSettings = serde_json::from_str(
            r#"{"enabled": false, "threshold": 3, "notification_email": "a@b.c", "notification_dashboard": false}"#,
        )
        .unwrap();
        assert_eq!(parsed.notification_email, "a@b.c");
        assert!(!parsed.notification_dashboard);
    }

    #[test]
    fn test_dto_keys_are_product_ids() {
        let json = r#"{
            "global": {"enabled": true, "threshold": 5, "notificationEmail": "", "notificationDashboard": true},
            "products": {"7": {"enabled": true, "threshold": null, "notificationEmail": "", "notificationDashboard": true}}
        }"#;
        let dto: AlertSettingsDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.products[&ProductId(7)].threshold, None);
    }

    #[test]
    fn test_validate_global_form() {
        let mut global = AlertSettings::default();
        assert_eq!(global.validate(), Ok(()));
        global.threshold = 0;
        assert_eq!(global.validate(), Err(ValidationError::ThresholdBelowOne));
        global.threshold = 2;
        global.notification_email = "not-an-email".to_string();
        assert_eq!(global.validate(), Err(ValidationError::InvalidEmail));
    }
}
