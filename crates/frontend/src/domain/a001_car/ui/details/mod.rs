//! Car editor UI module (create and edit)
//!
//! - view_model.rs: editor state and commands (load, step navigation, submit)
//! - view.rs: Leptos components (pure UI)

mod view;
mod view_model;

pub use view::CarDetails;
pub use view_model::CarDetailsViewModel;
