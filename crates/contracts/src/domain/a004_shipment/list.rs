use super::aggregate::Shipment;
use crate::shared::list_projection::{
    DirectionPolicy, ListConfig, Searchable, SortDirection, SortField, SortSpec, SortValue,
    Sortable,
};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentSearchField {
    TrackingNumber,
    Warehouse,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentSortField {
    Id,
    Status,
    CreatedAt,
    EstimatedDelivery,
    Warehouse,
}

impl SortField for ShipmentSortField {
    fn path(&self) -> &'static str {
        match self {
            ShipmentSortField::Id => "id",
            ShipmentSortField::Status => "status",
            ShipmentSortField::CreatedAt => "created_at",
            ShipmentSortField::EstimatedDelivery => "estimated_delivery",
            ShipmentSortField::Warehouse => "destination_warehouse",
        }
    }

    fn natural_direction(&self) -> SortDirection {
        match self {
            ShipmentSortField::Status | ShipmentSortField::Warehouse => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    fn all() -> &'static [Self] {
        &[
            ShipmentSortField::Id,
            ShipmentSortField::Status,
            ShipmentSortField::CreatedAt,
            ShipmentSortField::EstimatedDelivery,
            ShipmentSortField::Warehouse,
        ]
    }
}

impl Searchable for Shipment {
    type SearchField = ShipmentSearchField;

    fn search_text(&self, field: ShipmentSearchField) -> Option<Cow<'_, str>> {
        match field {
            ShipmentSearchField::TrackingNumber => self.tracking_number.as_deref().map(Cow::Borrowed),
            ShipmentSearchField::Warehouse => Some(Cow::Borrowed(self.destination_warehouse.as_str())),
            ShipmentSearchField::Notes => Some(Cow::Borrowed(self.notes.as_str())),
        }
    }
}

impl Sortable for Shipment {
    type SortField = ShipmentSortField;

    fn sort_value(&self, field: ShipmentSortField) -> SortValue<'_> {
        match field {
            ShipmentSortField::Id => SortValue::Integer(self.id),
            ShipmentSortField::Status => SortValue::Integer(self.status.rank()),
            ShipmentSortField::CreatedAt => SortValue::Instant(self.created_at),
            ShipmentSortField::EstimatedDelivery => SortValue::opt_instant(self.estimated_delivery),
            ShipmentSortField::Warehouse => SortValue::text(&self.destination_warehouse),
        }
    }
}

/// Отслеживание отправок: новые сверху, новое поле по естественному направлению
pub const SHIPMENTS_PAGE: ListConfig<Shipment> = ListConfig {
    search_fields: &[
        ShipmentSearchField::TrackingNumber,
        ShipmentSearchField::Warehouse,
        ShipmentSearchField::Notes,
    ],
    initial_sort: SortSpec {
        field: ShipmentSortField::CreatedAt,
        direction: SortDirection::Descending,
    },
    new_field_direction: DirectionPolicy::Natural,
};
