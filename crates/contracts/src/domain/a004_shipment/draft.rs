//! Планирование отправки: черновик, который собирает пользователь до отправки на бэкенд

use super::aggregate::{CreateShipmentItem, CreateShipmentRequest, ShipmentStatus, WAREHOUSES};
use crate::domain::a001_product::ProductId;
use crate::shared::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentDraft {
    pub items: Vec<DraftItem>,
    pub destination_warehouse: String,
    pub notes: String,
}

impl ShipmentDraft {
    /// Добавить товар; повторное добавление увеличивает количество на 1
    pub fn add_product(&mut self, product_id: ProductId) {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(DraftItem { product_id, quantity: 1 }),
        }
    }

    pub fn remove_product(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Количество ≤ 0 удаляет позицию
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_product(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn validate(&self) -> Result<CreateShipmentRequest, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::NoShipmentItems);
        }
        let destination = self.destination_warehouse.trim();
        if destination.is_empty() || !WAREHOUSES.contains(&destination) {
            return Err(ValidationError::NoDestination);
        }
        Ok(CreateShipmentRequest {
            status: ShipmentStatus::Draft,
            items: self
                .items
                .iter()
                .map(|i| CreateShipmentItem {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect(),
            destination_warehouse: destination.to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_existing_product_increments() {
        let mut draft = ShipmentDraft::default();
        draft.add_product(ProductId(1));
        draft.add_product(ProductId(2));
        draft.add_product(ProductId(1));
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0], DraftItem { product_id: ProductId(1), quantity: 2 });
        assert_eq!(draft.total_units(), 3);
    }

    #[test]
    fn test_non_positive_quantity_removes_item() {
        let mut draft = ShipmentDraft::default();
        draft.add_product(ProductId(1));
        draft.set_quantity(ProductId(1), 12);
        assert_eq!(draft.items[0].quantity, 12);
        draft.set_quantity(ProductId(1), 0);
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_validation() {
        let mut draft = ShipmentDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::NoShipmentItems));

        draft.add_product(ProductId(5));
        assert_eq!(draft.validate(), Err(ValidationError::NoDestination));

        draft.destination_warehouse = "CD Cajamar".to_string();
        let request = draft.validate().unwrap();
        assert_eq!(request.status, ShipmentStatus::Draft);
        assert_eq!(request.items, vec![CreateShipmentItem { product_id: ProductId(5), quantity: 1 }]);
    }
}
