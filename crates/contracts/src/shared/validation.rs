use thiserror::Error;

/// Ошибки проверки форм. Отправка блокируется, бэкенд не вызывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Выберите товар")]
    ProductNotSelected,
    #[error("Количество должно быть больше нуля")]
    NonPositiveQuantity,
    #[error("Укажите причину корректировки")]
    EmptyReason,
    #[error("Добавьте хотя бы один товар в отправку")]
    NoShipmentItems,
    #[error("Выберите склад назначения")]
    NoDestination,
    #[error("Порог должен быть не меньше 1")]
    ThresholdBelowOne,
    #[error("Некорректный адрес электронной почты")]
    InvalidEmail,
}

/// Пустой адрес допустим (уведомления по почте не отправляются)
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(""), Ok(()));
        assert_eq!(validate_email("ops@example.com"), Ok(()));
        assert_eq!(validate_email("ops"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
    }
}
