pub mod aggregate;
pub mod list;

pub use aggregate::{Activity, ActivityCounts, ActivityFilter, ActivityKind, ActivityQuery};
pub use list::{ActivitySearchField, ActivitySortField, ACTIVITY_PAGE};
