use serde::Deserialize;

use crate::domain::a001_car::Fuel;
use crate::shared::decimal::de_opt_decimal;

/// Pre-aggregated payload of `/statistics/`.
///
/// Every field is optional: each widget renders its own "no data" state
/// instead of failing the whole view.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CarStatistics {
    #[serde(default)]
    pub total_cars: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub avg_year: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub avg_mileage: Option<f64>,
    #[serde(default)]
    pub cars_by_fuel: Option<Vec<FuelCount>>,
    #[serde(default)]
    pub cars_by_mark: Option<Vec<MarkCount>>,
    #[serde(default)]
    pub cars_by_province: Option<Vec<ProvinceCount>>,
    #[serde(default)]
    pub price_trends: Option<Vec<PriceTrend>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FuelCount {
    pub fuel: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkCount {
    pub mark: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProvinceCount {
    pub province: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceTrend {
    pub month: String,
    #[serde(deserialize_with = "crate::shared::decimal::de_decimal")]
    pub avg_price: f64,
}

/// One labelled value of a chart
pub const FUEL_CHART_TITLE: &str = "Samochody wg rodzaju paliwa";
pub const MARK_CHART_TITLE: &str = "Liczba samochodów wg marki";
pub const PROVINCE_CHART_TITLE: &str = "Samochody wg województwa";
pub const PRICE_TREND_CHART_TITLE: &str = "Średnia cena";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_points(title: &'static str, points: Vec<ChartPoint>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { title, points })
        }
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    /// Each value as a fraction of the largest one (0.0 when all are zero).
    pub fn ratios(&self) -> Vec<f64> {
        let max = self.max_value();
        self.points
            .iter()
            .map(|p| if max > 0.0 { (p.value / max).clamp(0.0, 1.0) } else { 0.0 })
            .collect()
    }
}

impl CarStatistics {
    pub fn fuel_series(&self) -> Option<ChartSeries> {
        let points = self
            .cars_by_fuel
            .as_ref()?
            .iter()
            .map(|item| ChartPoint {
                label: Fuel::display_label(&item.fuel),
                value: item.count as f64,
            })
            .collect();
        ChartSeries::from_points(FUEL_CHART_TITLE, points)
    }

    pub fn mark_series(&self) -> Option<ChartSeries> {
        let points = self
            .cars_by_mark
            .as_ref()?
            .iter()
            .map(|item| ChartPoint {
                label: capitalize(&item.mark),
                value: item.count as f64,
            })
            .collect();
        ChartSeries::from_points(MARK_CHART_TITLE, points)
    }

    pub fn province_series(&self) -> Option<ChartSeries> {
        let points = self
            .cars_by_province
            .as_ref()?
            .iter()
            .map(|item| ChartPoint {
                label: item.province.clone(),
                value: item.count as f64,
            })
            .collect();
        ChartSeries::from_points(PROVINCE_CHART_TITLE, points)
    }

    pub fn price_trend_series(&self) -> Option<ChartSeries> {
        let points = self
            .price_trends
            .as_ref()?
            .iter()
            .map(|item| ChartPoint {
                label: item.month.clone(),
                value: item.avg_price,
            })
            .collect();
        ChartSeries::from_points(PRICE_TREND_CHART_TITLE, points)
    }
}

/// First letter upper-case, the rest lower-case ("TOYOTA" -> "Toyota").
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_payload() {
        let stats: CarStatistics = serde_json::from_str(
            r#"{"total_cars": 12, "avg_price": "45000.50", "cars_by_fuel": []}"#,
        )
        .unwrap();
        assert_eq!(stats.total_cars, Some(12));
        assert_eq!(stats.avg_price, Some(45000.5));
        assert_eq!(stats.max_price, None);
        assert!(stats.fuel_series().is_none());
        assert!(stats.mark_series().is_none());
    }

    #[test]
    fn builds_series_with_display_labels() {
        let stats: CarStatistics = serde_json::from_str(
            r#"{
                "cars_by_fuel": [{"fuel": "diesel", "count": 3}, {"fuel": "Gasoline", "count": 6}],
                "cars_by_mark": [{"mark": "SKODA", "count": 4}],
                "price_trends": [{"month": "2024-01", "avg_price": "30000"}]
            }"#,
        )
        .unwrap();

        let fuel = stats.fuel_series().unwrap();
        assert_eq!(fuel.points[0].label, "Diesel");
        assert_eq!(fuel.points[1].label, "Benzyna");
        assert_eq!(fuel.ratios(), vec![0.5, 1.0]);

        assert_eq!(stats.mark_series().unwrap().points[0].label, "Skoda");
        assert_eq!(stats.price_trend_series().unwrap().points[0].value, 30000.0);
    }

    #[test]
    fn ratios_of_all_zero_series_are_zero() {
        let series = ChartSeries {
            title: "t",
            points: vec![ChartPoint { label: "a".into(), value: 0.0 }],
        };
        assert_eq!(series.ratios(), vec![0.0]);
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ŁADA"), "Łada");
    }
}
