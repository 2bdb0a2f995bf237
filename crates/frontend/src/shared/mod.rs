pub mod api_utils;
pub mod components;
pub mod data_source;
pub mod date_utils;
pub mod export;
pub mod feedback;
pub mod icons;
pub mod list_utils;
pub mod number_format;
