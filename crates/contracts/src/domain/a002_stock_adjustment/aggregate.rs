use crate::domain::a001_product::ProductId;
use crate::shared::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Тип ручной корректировки остатков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentType {
    #[serde(rename = "entrada_manual")]
    ManualIn,
    #[serde(rename = "saida_manual")]
    ManualOut,
    #[serde(rename = "perda")]
    Loss,
    #[serde(rename = "dano")]
    Damage,
}

impl Default for AdjustmentType {
    fn default() -> Self {
        AdjustmentType::ManualIn
    }
}

impl AdjustmentType {
    /// Код типа на стороне бэкенда
    pub fn code(&self) -> &'static str {
        match self {
            AdjustmentType::ManualIn => "entrada_manual",
            AdjustmentType::ManualOut => "saida_manual",
            AdjustmentType::Loss => "perda",
            AdjustmentType::Damage => "dano",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AdjustmentType::ManualIn => "Ручное поступление",
            AdjustmentType::ManualOut => "Ручное списание",
            AdjustmentType::Loss => "Потеря",
            AdjustmentType::Damage => "Повреждение",
        }
    }

    pub fn all() -> Vec<AdjustmentType> {
        vec![
            AdjustmentType::ManualIn,
            AdjustmentType::ManualOut,
            AdjustmentType::Loss,
            AdjustmentType::Damage,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }

    /// Уменьшает ли корректировка остаток
    pub fn is_outgoing(&self) -> bool {
        !matches!(self, AdjustmentType::ManualIn)
    }

    /// Количество со знаком: списания отрицательные, поступление положительное
    pub fn signed(&self, quantity: i64) -> i64 {
        if self.is_outgoing() {
            -quantity.abs()
        } else {
            quantity.abs()
        }
    }
}

/// Запрос POST /api/stock/adjust
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustmentRequest {
    pub product_id: ProductId,
    pub adjustment_type: AdjustmentType,
    /// Количество уже со знаком
    pub quantity: i64,
    pub reason: String,
}

/// Состояние формы корректировки до проверки
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockAdjustmentForm {
    pub product_id: Option<ProductId>,
    pub adjustment_type: AdjustmentType,
    pub quantity: i64,
    pub reason: String,
}

impl StockAdjustmentForm {
    /// Проверить форму и собрать запрос
    pub fn validate(&self) -> Result<StockAdjustmentRequest, ValidationError> {
        let product_id = self.product_id.ok_or(ValidationError::ProductNotSelected)?;
        if self.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::EmptyReason);
        }
        Ok(StockAdjustmentRequest {
            product_id,
            adjustment_type: self.adjustment_type,
            quantity: self.adjustment_type.signed(self.quantity),
            reason: reason.to_string(),
        })
    }
}

/// Остатки после корректировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevels {
    pub available: i64,
    pub total: i64,
    pub not_available: i64,
}

/// Ответ POST /api/stock/adjust
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustmentAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub adjustment_id: i64,
    pub new_stock: StockLevels,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> StockAdjustmentForm {
        StockAdjustmentForm {
            product_id: Some(ProductId(3)),
            adjustment_type: AdjustmentType::Loss,
            quantity: 4,
            reason: "  разбито при приёмке ".to_string(),
        }
    }

    #[test]
    fn test_outgoing_types_are_sent_negative() {
        let request = form().validate().unwrap();
        assert_eq!(request.quantity, -4);
        assert_eq!(request.reason, "разбито при приёмке");

        let mut incoming = form();
        incoming.adjustment_type = AdjustmentType::ManualIn;
        assert_eq!(incoming.validate().unwrap().quantity, 4);
    }

    #[test]
    fn test_validation_order() {
        let mut f = form();
        f.product_id = None;
        f.quantity = 0;
        assert_eq!(f.validate(), Err(ValidationError::ProductNotSelected));

        let mut f = form();
        f.quantity = -1;
        assert_eq!(f.validate(), Err(ValidationError::NonPositiveQuantity));

        let mut f = form();
        f.reason = "   ".to_string();
        assert_eq!(f.validate(), Err(ValidationError::EmptyReason));
    }

    #[test]
    fn test_wire_codes() {
        let json = serde_json::to_string(&AdjustmentType::Damage).unwrap();
        assert_eq!(json, "\"dano\"");
        assert_eq!(AdjustmentType::from_code("saida_manual"), Some(AdjustmentType::ManualOut));
    }
}
