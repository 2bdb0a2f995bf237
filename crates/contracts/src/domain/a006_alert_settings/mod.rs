pub mod aggregate;

pub use aggregate::{AlertField, AlertOverride, AlertOverrides, AlertSettings, AlertSettingsDto};
