pub mod d400_car_statistics;
pub mod d401_overview;

pub use d400_car_statistics::ui::CarStatisticsDashboard;
pub use d401_overview::ui::OverviewDashboard;
