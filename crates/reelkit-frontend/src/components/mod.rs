pub mod download_indicator;
pub mod form_field;
