use super::aggregate::Sale;
use crate::shared::list_projection::{
    DirectionPolicy, ListConfig, Searchable, SortDirection, SortField, SortSpec, SortValue,
    Sortable,
};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleSearchField {
    ProductTitle,
    OrderId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleSortField {
    SaleTimestamp,
    ProductTitle,
    OrderId,
    QuantitySold,
    Price,
}

impl SortField for SaleSortField {
    fn path(&self) -> &'static str {
        match self {
            SaleSortField::SaleTimestamp => "sale_timestamp",
            SaleSortField::ProductTitle => "product_title",
            SaleSortField::OrderId => "ml_order_id",
            SaleSortField::QuantitySold => "quantity_sold",
            SaleSortField::Price => "price",
        }
    }

    fn natural_direction(&self) -> SortDirection {
        match self {
            SaleSortField::ProductTitle | SaleSortField::OrderId => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    fn all() -> &'static [Self] {
        &[
            SaleSortField::SaleTimestamp,
            SaleSortField::ProductTitle,
            SaleSortField::OrderId,
            SaleSortField::QuantitySold,
            SaleSortField::Price,
        ]
    }
}

impl Searchable for Sale {
    type SearchField = SaleSearchField;

    fn search_text(&self, field: SaleSearchField) -> Option<Cow<'_, str>> {
        match field {
            SaleSearchField::ProductTitle => Some(Cow::Borrowed(self.product_title.as_str())),
            SaleSearchField::OrderId => Some(Cow::Borrowed(self.ml_order_id.as_str())),
        }
    }
}

impl Sortable for Sale {
    type SortField = SaleSortField;

    fn sort_value(&self, field: SaleSortField) -> SortValue<'_> {
        match field {
            SaleSortField::SaleTimestamp => SortValue::Instant(self.sale_timestamp),
            SaleSortField::ProductTitle => SortValue::text(&self.product_title),
            SaleSortField::OrderId => SortValue::text(&self.ml_order_id),
            SaleSortField::QuantitySold => SortValue::Integer(self.quantity_sold),
            SaleSortField::Price => SortValue::opt_decimal(self.price),
        }
    }
}

/// История продаж: свежие сверху, новое поле по убыванию
pub const SALES_PAGE: ListConfig<Sale> = ListConfig {
    search_fields: &[SaleSearchField::ProductTitle, SaleSearchField::OrderId],
    initial_sort: SortSpec {
        field: SaleSortField::SaleTimestamp,
        direction: SortDirection::Descending,
    },
    new_field_direction: DirectionPolicy::Fixed(SortDirection::Descending),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::ProductId;
    use chrono::{Duration, TimeZone, Utc};

    fn sale(id: i64, title: &str, qty: i64, hours_ago: i64) -> Sale {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        Sale {
            id,
            product_id: ProductId(id),
            product_title: title.to_string(),
            ml_order_id: format!("ML{}", 9000 + id),
            quantity_sold: qty,
            sale_timestamp: now - Duration::hours(hours_ago),
            price: None,
        }
    }

    #[test]
    fn test_latest_first_by_default() {
        let items = vec![sale(1, "TV", 1, 30), sale(2, "Fone", 3, 2), sale(3, "TV", 2, 10)];
        let out = SALES_PAGE.project(&items, "", SALES_PAGE.initial_sort);
        assert_eq!(out.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }

    #[test]
    fn test_search_by_order_id() {
        let items = vec![sale(1, "TV", 1, 30), sale(2, "Fone", 3, 2)];
        let out = SALES_PAGE.project(&items, "ml9001", SALES_PAGE.initial_sort);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_revenue_without_price_is_zero() {
        let mut s = sale(1, "TV", 3, 1);
        assert_eq!(s.revenue(), 0.0);
        s.price = Some(100.5);
        assert!((s.revenue() - 301.5).abs() < 1e-9);
    }
}
