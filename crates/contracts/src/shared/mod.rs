pub mod api_error;
pub mod decimal;
pub mod field_errors;
pub mod list_page;
pub mod stepper;
