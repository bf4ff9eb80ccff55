mod dashboard;

pub use dashboard::CarStatisticsDashboard;
pub(crate) use dashboard::{avg_mileage_text, avg_price_text, total_text};
