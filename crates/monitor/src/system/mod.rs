pub mod tracing;
pub mod worker;
