pub mod aggregate;
pub mod draft;
pub mod list;

pub use aggregate::{CreateShipmentItem, CreateShipmentRequest, Shipment, ShipmentItem, ShipmentStatus, WAREHOUSES};
pub use draft::{DraftItem, ShipmentDraft};
pub use list::{ShipmentSearchField, ShipmentSortField, SHIPMENTS_PAGE};
