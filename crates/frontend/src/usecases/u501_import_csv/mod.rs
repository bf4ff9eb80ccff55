//! CSV import usecase: file validation and upload with progress

pub mod api;
pub mod view;

pub use view::ImportCsvWidget;
