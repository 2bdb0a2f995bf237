//! Поиск и сортировка списка товаров

use super::aggregate::Product;
use crate::shared::list_projection::{
    DirectionPolicy, ListConfig, Searchable, SortDirection, SortField, SortSpec, SortValue,
    Sortable,
};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductSearchField {
    Title,
    Sku,
    MlItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductSortField {
    Id,
    Sku,
    MlItemId,
    Title,
    CreatedAt,
    StockTotal,
    StockAvailable,
    StockNotAvailable,
    StockLastUpdated,
}

impl SortField for ProductSortField {
    fn path(&self) -> &'static str {
        match self {
            ProductSortField::Id => "id",
            ProductSortField::Sku => "sku",
            ProductSortField::MlItemId => "ml_item_id",
            ProductSortField::Title => "title",
            ProductSortField::CreatedAt => "created_at",
            ProductSortField::StockTotal => "stock.total",
            ProductSortField::StockAvailable => "stock.available",
            ProductSortField::StockNotAvailable => "stock.not_available",
            ProductSortField::StockLastUpdated => "stock.last_updated",
        }
    }

    fn natural_direction(&self) -> SortDirection {
        match self {
            ProductSortField::Id
            | ProductSortField::Sku
            | ProductSortField::MlItemId
            | ProductSortField::Title => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    fn all() -> &'static [Self] {
        &[
            ProductSortField::Id,
            ProductSortField::Sku,
            ProductSortField::MlItemId,
            ProductSortField::Title,
            ProductSortField::CreatedAt,
            ProductSortField::StockTotal,
            ProductSortField::StockAvailable,
            ProductSortField::StockNotAvailable,
            ProductSortField::StockLastUpdated,
        ]
    }
}

impl Searchable for Product {
    type SearchField = ProductSearchField;

    fn search_text(&self, field: ProductSearchField) -> Option<Cow<'_, str>> {
        let text = match field {
            ProductSearchField::Title => &self.title,
            ProductSearchField::Sku => &self.sku,
            ProductSearchField::MlItemId => &self.ml_item_id,
        };
        Some(Cow::Borrowed(text.as_str()))
    }
}

impl Sortable for Product {
    type SortField = ProductSortField;

    fn sort_value(&self, field: ProductSortField) -> SortValue<'_> {
        match field {
            ProductSortField::Id => SortValue::Integer(self.id.value()),
            ProductSortField::Sku => SortValue::text(&self.sku),
            ProductSortField::MlItemId => SortValue::text(&self.ml_item_id),
            ProductSortField::Title => SortValue::text(&self.title),
            ProductSortField::CreatedAt => SortValue::Instant(self.created_at),
            ProductSortField::StockTotal => SortValue::Integer(self.stock.total),
            ProductSortField::StockAvailable => SortValue::Integer(self.stock.available),
            ProductSortField::StockNotAvailable => SortValue::Integer(self.stock.not_available),
            ProductSortField::StockLastUpdated => SortValue::opt_instant(self.stock.last_updated),
        }
    }
}

/// Страница «Товары»: поиск по названию, SKU и ID объявления; новое поле по возрастанию
pub const PRODUCTS_PAGE: ListConfig<Product> = ListConfig {
    search_fields: &[
        ProductSearchField::Title,
        ProductSearchField::Sku,
        ProductSearchField::MlItemId,
    ],
    initial_sort: SortSpec {
        field: ProductSortField::Id,
        direction: SortDirection::Ascending,
    },
    new_field_direction: DirectionPolicy::Fixed(SortDirection::Ascending),
};

/// Страница «Остатки»: поиск по названию и SKU; новое поле по убыванию (больше остаток выше)
pub const STOCK_PAGE: ListConfig<Product> = ListConfig {
    search_fields: &[ProductSearchField::Title, ProductSearchField::Sku],
    initial_sort: SortSpec {
        field: ProductSortField::StockAvailable,
        direction: SortDirection::Descending,
    },
    new_field_direction: DirectionPolicy::Fixed(SortDirection::Descending),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::{ProductId, StockSummary};
    use chrono::{TimeZone, Utc};

    fn product(id: i64, title: &str, sku: &str, available: i64) -> Product {
        Product {
            id: ProductId(id),
            sku: sku.to_string(),
            ml_item_id: format!("MLB{}", 1000 + id),
            ml_inventory_id: Some(format!("INV{}", id)),
            title: title.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, id as u32, 0, 0, 0).unwrap(),
            stock: StockSummary { total: available + 1, available, not_available: 1, last_updated: None },
        }
    }

    #[test]
    fn test_search_by_title_ascending() {
        // Остатки ищут только по названию и SKU
        let items = vec![product(1, "A", "S-1", 2), product(2, "B", "S-2", 10)];
        let out = STOCK_PAGE.project(&items, "b", SortSpec::ascending(ProductSortField::Title));
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![ProductId(2)]);
    }

    #[test]
    fn test_products_page_matches_listing_prefix() {
        // «b» есть в каждом MLB-идентификаторе объявления
        let items = vec![product(1, "A", "S-1", 2), product(2, "B", "S-2", 10)];
        let out = PRODUCTS_PAGE.project(&items, "b", SortSpec::ascending(ProductSortField::Title));
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![ProductId(1), ProductId(2)]);
    }

    #[test]
    fn test_products_page_searches_ml_item_id_but_stock_page_does_not() {
        let items = vec![product(1, "Notebook", "NB-1", 2), product(2, "TV", "TV-2", 10)];
        let out = PRODUCTS_PAGE.project(&items, "mlb1002", PRODUCTS_PAGE.initial_sort);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![ProductId(2)]);
        let out = STOCK_PAGE.project(&items, "mlb1002", STOCK_PAGE.initial_sort);
        assert!(out.is_empty());
    }

    #[test]
    fn test_nested_stock_field_sort() {
        let items = vec![
            product(1, "A", "S-1", 2),
            product(2, "B", "S-2", 10),
            product(3, "C", "S-3", 5),
        ];
        let out = STOCK_PAGE.project(&items, "", STOCK_PAGE.initial_sort);
        assert_eq!(
            out.iter().map(|p| p.id.value()).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_page_default_directions() {
        let spec = PRODUCTS_PAGE.toggle(PRODUCTS_PAGE.initial_sort, ProductSortField::StockAvailable);
        assert_eq!(spec, SortSpec::ascending(ProductSortField::StockAvailable));
        let spec = STOCK_PAGE.toggle(STOCK_PAGE.initial_sort, ProductSortField::StockTotal);
        assert_eq!(spec, SortSpec::descending(ProductSortField::StockTotal));
        let spec = STOCK_PAGE.toggle(spec, ProductSortField::StockTotal);
        assert_eq!(spec, SortSpec::ascending(ProductSortField::StockTotal));
    }

    #[test]
    fn test_never_synced_products_sort_last() {
        let mut synced = product(1, "A", "S-1", 2);
        synced.stock.last_updated = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        let never = product(2, "B", "S-2", 2);
        let items = vec![never, synced];
        let out = PRODUCTS_PAGE.project(&items, "", SortSpec::descending(ProductSortField::StockLastUpdated));
        assert_eq!(out[0].id, ProductId(1));
        assert_eq!(ProductSortField::from_path("stock.available"), Some(ProductSortField::StockAvailable));
    }
}
