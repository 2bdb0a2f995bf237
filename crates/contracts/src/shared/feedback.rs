//! Сообщения пользователю по итогам загрузки и отправки форм.
//!
//! Ошибка загрузки остаётся на экране (предыдущие данные не сбрасываются),
//! ошибки проверки показываются у формы до исправления, результат отправки
//! исчезает сам через [`FLASH_DISMISS_MS`].

use crate::shared::data_access::ApiError;
use crate::shared::validation::ValidationError;

/// Через сколько миллисекунд скрывать сообщения об отправке
pub const FLASH_DISMISS_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Не удалось загрузить данные; можно повторить
    LoadFailed,
    /// Форма заполнена неверно; бэкенд не вызывался
    Invalid,
    /// Бэкенд отклонил отправку
    SubmitFailed,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    /// `what` в винительном падеже: «товары», «историю продаж»
    pub fn load_failed(what: &str, error: &ApiError) -> Self {
        let text = match error {
            ApiError::Unauthorized => "Сессия истекла. Войдите снова.".to_string(),
            _ => format!("Не удалось загрузить {}. Попробуйте ещё раз позже.", what),
        };
        Self {
            kind: FeedbackKind::LoadFailed,
            text,
        }
    }

    pub fn invalid(error: ValidationError) -> Self {
        Self {
            kind: FeedbackKind::Invalid,
            text: error.to_string(),
        }
    }

    pub fn submit_failed(error: &ApiError) -> Self {
        Self {
            kind: FeedbackKind::SubmitFailed,
            text: error.to_string(),
        }
    }

    /// Файл не сформировался в браузере; показывается как неудачная отправка
    pub fn export_failed(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::SubmitFailed,
            text: format!("Не удалось выгрузить файл: {}", text.into()),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self.kind, FeedbackKind::Success)
    }

    /// Задержка автоскрытия; None: сообщение висит до следующего действия
    pub fn auto_dismiss_ms(&self) -> Option<u32> {
        match self.kind {
            FeedbackKind::SubmitFailed | FeedbackKind::Success => Some(FLASH_DISMISS_MS),
            FeedbackKind::LoadFailed | FeedbackKind::Invalid => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FeedbackKind::Success => "alert alert-success",
            FeedbackKind::Invalid => "alert alert-warning",
            FeedbackKind::LoadFailed | FeedbackKind::SubmitFailed => "alert alert-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy() {
        let load = Feedback::load_failed("товары", &ApiError::Network("timeout".into()));
        assert_eq!(load.kind, FeedbackKind::LoadFailed);
        assert_eq!(load.text, "Не удалось загрузить товары. Попробуйте ещё раз позже.");
        assert_eq!(load.auto_dismiss_ms(), None);

        let invalid = Feedback::invalid(ValidationError::EmptyReason);
        assert_eq!(invalid.text, "Укажите причину корректировки");
        assert_eq!(invalid.auto_dismiss_ms(), None);

        let failed = Feedback::submit_failed(&ApiError::Http { status: 400, message: "bad".into() });
        assert!(failed.is_error());
        assert_eq!(failed.auto_dismiss_ms(), Some(5000));

        let ok = Feedback::success("Сохранено");
        assert!(!ok.is_error());
        assert_eq!(ok.auto_dismiss_ms(), Some(FLASH_DISMISS_MS));
    }

    #[test]
    fn test_expired_session() {
        let f = Feedback::load_failed("товары", &ApiError::Unauthorized);
        assert_eq!(f.text, "Сессия истекла. Войдите снова.");
    }
}
