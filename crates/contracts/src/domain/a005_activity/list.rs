use super::aggregate::Activity;
use crate::shared::list_projection::{
    DirectionPolicy, ListConfig, Searchable, SortDirection, SortField, SortSpec, SortValue,
    Sortable,
};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivitySearchField {
    Description,
    ProductTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivitySortField {
    Timestamp,
    Kind,
    ProductTitle,
}

impl SortField for ActivitySortField {
    fn path(&self) -> &'static str {
        match self {
            ActivitySortField::Timestamp => "timestamp",
            ActivitySortField::Kind => "type",
            ActivitySortField::ProductTitle => "product_title",
        }
    }

    fn natural_direction(&self) -> SortDirection {
        match self {
            ActivitySortField::Timestamp => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    fn all() -> &'static [Self] {
        &[
            ActivitySortField::Timestamp,
            ActivitySortField::Kind,
            ActivitySortField::ProductTitle,
        ]
    }
}

impl Searchable for Activity {
    type SearchField = ActivitySearchField;

    fn search_text(&self, field: ActivitySearchField) -> Option<Cow<'_, str>> {
        match field {
            ActivitySearchField::Description => Some(Cow::Borrowed(self.description.as_str())),
            ActivitySearchField::ProductTitle => self.kind.product_title().map(Cow::Borrowed),
        }
    }
}

impl Sortable for Activity {
    type SortField = ActivitySortField;

    fn sort_value(&self, field: ActivitySortField) -> SortValue<'_> {
        match field {
            ActivitySortField::Timestamp => SortValue::Instant(self.timestamp),
            ActivitySortField::Kind => SortValue::text(self.kind.filter().code()),
            ActivitySortField::ProductTitle => SortValue::opt_text(self.kind.product_title()),
        }
    }
}

/// История действий: по описанию и названию товара, свежие сверху
pub const ACTIVITY_PAGE: ListConfig<Activity> = ListConfig {
    search_fields: &[ActivitySearchField::Description, ActivitySearchField::ProductTitle],
    initial_sort: SortSpec {
        field: ActivitySortField::Timestamp,
        direction: SortDirection::Descending,
    },
    new_field_direction: DirectionPolicy::Natural,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::ProductId;
    use crate::domain::a005_activity::ActivityKind;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_sync_entries_match_only_by_description() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let items = vec![
            Activity {
                id: "sync_1".to_string(),
                description: "Синхронизация с маркетплейсом".to_string(),
                timestamp: now - Duration::hours(1),
                kind: ActivityKind::Sync,
            },
            Activity {
                id: "sale_1".to_string(),
                description: "Продажа".to_string(),
                timestamp: now,
                kind: ActivityKind::Sale {
                    product_id: ProductId(1),
                    product_title: "Smart TV".to_string(),
                    quantity: 1,
                    reference_id: "ML1".to_string(),
                },
            },
        ];
        let out = ACTIVITY_PAGE.project(&items, "tv", ACTIVITY_PAGE.initial_sort);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "sale_1");

        let out = ACTIVITY_PAGE.project(&items, "", ACTIVITY_PAGE.initial_sort);
        assert_eq!(out[0].id, "sale_1");

        // у синхронизации нет товара: при сортировке по товару она в конце
        let out = ACTIVITY_PAGE.project(&items, "", SortSpec::ascending(ActivitySortField::ProductTitle));
        assert_eq!(out[1].id, "sync_1");
    }
}
