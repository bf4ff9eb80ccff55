pub mod aggregate;
pub mod distinct;
pub mod editor;
pub mod form;
pub mod query;

pub use aggregate::{CarDto, CarId, Fuel, Province};
pub use distinct::DistinctValues;
pub use editor::CarEditor;
pub use form::{CarField, CarForm, CarFormStep};
pub use query::{
    CarFilter, CarListQuery, CarListRequest, FilterField, SortOption, DEFAULT_PAGE_SIZE,
    PAGE_SIZES,
};
