use contracts::domain::a001_car::{CarDto, CarListQuery, DistinctValues};
use contracts::shared::list_page::ListPage;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct CarListState {
    pub query: CarListQuery,
    pub page: ListPage<CarDto>,
    pub distinct: DistinctValues,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,
    /// Record waiting for delete confirmation
    pub pending_delete: Option<CarDto>,
}

impl CarListState {
    pub fn total_pages(&self) -> usize {
        self.query.total_pages(self.page.total)
    }
}

pub fn create_state() -> RwSignal<CarListState> {
    RwSignal::new(CarListState::default())
}
