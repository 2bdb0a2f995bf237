pub mod report_period;
pub mod sync_kind;

pub use report_period::ReportPeriod;
pub use sync_kind::SyncKind;
