use serde::{Deserialize, Serialize};

use crate::shared::decimal::de_decimal;

// ============================================================================
// ID Type
// ============================================================================

/// Server-assigned primary key of a car record
pub type CarId = i64;

// ============================================================================
// Fuel
// ============================================================================

/// Fuel options offered by the editor.
///
/// Records keep the server string as is (see [`CarDto::fuel`]); this type
/// only names and labels the known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fuel {
    #[default]
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
    Lpg,
    Cng,
    Other,
}

impl Fuel {
    pub const ALL: [Fuel; 7] = [
        Fuel::Gasoline,
        Fuel::Diesel,
        Fuel::Electric,
        Fuel::Hybrid,
        Fuel::Lpg,
        Fuel::Cng,
        Fuel::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fuel::Gasoline => "gasoline",
            Fuel::Diesel => "diesel",
            Fuel::Electric => "electric",
            Fuel::Hybrid => "hybrid",
            Fuel::Lpg => "lpg",
            Fuel::Cng => "cng",
            Fuel::Other => "other",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Fuel::Gasoline => "Benzyna",
            Fuel::Diesel => "Diesel",
            Fuel::Electric => "Elektryczny",
            Fuel::Hybrid => "Hybryda",
            Fuel::Lpg => "LPG",
            Fuel::Cng => "CNG",
            Fuel::Other => "Inne",
        }
    }

    /// Matches a wire name or a Polish label, ignoring case.
    pub fn parse(value: &str) -> Option<Fuel> {
        let value = value.trim().to_lowercase();
        Fuel::ALL
            .into_iter()
            .find(|fuel| fuel.as_str() == value || fuel.label().to_lowercase() == value)
    }

    /// Label for a raw server value. Unknown values are shown as stored.
    pub fn display_label(raw: &str) -> String {
        match Fuel::parse(raw) {
            Some(fuel) => fuel.label().to_string(),
            None if raw.trim().is_empty() => Fuel::Other.label().to_string(),
            None => raw.trim().to_string(),
        }
    }
}

// ============================================================================
// Province
// ============================================================================

/// Polish voivodeship. Required on every record and offered as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Province {
    Dolnoslaskie,
    KujawskoPomorskie,
    Lubelskie,
    Lubuskie,
    Lodzkie,
    Malopolskie,
    Mazowieckie,
    Opolskie,
    Podkarpackie,
    Podlaskie,
    Pomorskie,
    Slaskie,
    Swietokrzyskie,
    WarminskoMazurskie,
    Wielkopolskie,
    Zachodniopomorskie,
}

impl Province {
    pub const ALL: [Province; 16] = [
        Province::Dolnoslaskie,
        Province::KujawskoPomorskie,
        Province::Lubelskie,
        Province::Lubuskie,
        Province::Lodzkie,
        Province::Malopolskie,
        Province::Mazowieckie,
        Province::Opolskie,
        Province::Podkarpackie,
        Province::Podlaskie,
        Province::Pomorskie,
        Province::Slaskie,
        Province::Swietokrzyskie,
        Province::WarminskoMazurskie,
        Province::Wielkopolskie,
        Province::Zachodniopomorskie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Province::Dolnoslaskie => "Dolnośląskie",
            Province::KujawskoPomorskie => "Kujawsko-pomorskie",
            Province::Lubelskie => "Lubelskie",
            Province::Lubuskie => "Lubuskie",
            Province::Lodzkie => "Łódzkie",
            Province::Malopolskie => "Małopolskie",
            Province::Mazowieckie => "Mazowieckie",
            Province::Opolskie => "Opolskie",
            Province::Podkarpackie => "Podkarpackie",
            Province::Podlaskie => "Podlaskie",
            Province::Pomorskie => "Pomorskie",
            Province::Slaskie => "Śląskie",
            Province::Swietokrzyskie => "Świętokrzyskie",
            Province::WarminskoMazurskie => "Warmińsko-mazurskie",
            Province::Wielkopolskie => "Wielkopolskie",
            Province::Zachodniopomorskie => "Zachodniopomorskie",
        }
    }

    /// Case-insensitive match against the province names.
    pub fn parse(value: &str) -> Option<Province> {
        let value = value.trim().to_lowercase();
        Province::ALL
            .into_iter()
            .find(|p| p.as_str().to_lowercase() == value)
    }
}

// ============================================================================
// Record
// ============================================================================

/// Car record as exchanged with `/cars/`.
///
/// `fuel` and `province` stay plain strings here: records imported from CSV
/// may hold values outside [`Fuel`] and [`Province`], and saving a record must
/// not rewrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CarId>,
    pub mark: String,
    pub model: String,
    #[serde(default)]
    pub generation_name: Option<String>,
    pub year: i32,
    pub mileage: i64,
    #[serde(deserialize_with = "de_decimal")]
    pub vol_engine: f64,
    pub fuel: String,
    pub city: String,
    pub province: String,
    #[serde(deserialize_with = "de_decimal")]
    pub price: f64,
}

impl CarDto {
    pub fn title(&self) -> String {
        format!("{} {}", self.mark, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_parse_accepts_names_and_labels() {
        assert_eq!(Fuel::parse("Diesel"), Some(Fuel::Diesel));
        assert_eq!(Fuel::parse("LPG"), Some(Fuel::Lpg));
        assert_eq!(Fuel::parse(" benzyna "), Some(Fuel::Gasoline));
        assert_eq!(Fuel::parse("Hydrogen"), None);
    }

    #[test]
    fn unknown_fuel_keeps_its_own_label() {
        assert_eq!(Fuel::display_label("gasoline"), "Benzyna");
        assert_eq!(Fuel::display_label(" Hydrogen "), "Hydrogen");
        assert_eq!(Fuel::display_label(""), "Inne");
    }

    #[test]
    fn province_parse_matches_names() {
        assert_eq!(Province::parse("mazowieckie"), Some(Province::Mazowieckie));
        assert_eq!(Province::parse(" Śląskie "), Some(Province::Slaskie));
        assert_eq!(Province::parse("Bavaria"), None);
    }

    #[test]
    fn record_accepts_string_decimals() {
        let json = r#"{
            "id": 5, "mark": "toyota", "model": "corolla", "generation_name": null,
            "year": 2015, "mileage": 120000, "vol_engine": 1.6, "fuel": "Gasoline",
            "city": "Kraków", "province": "Małopolskie", "price": "32900.00"
        }"#;
        let car: CarDto = serde_json::from_str(json).unwrap();
        assert_eq!(car.id, Some(5));
        assert_eq!(car.fuel, "Gasoline");
        assert_eq!(car.price, 32900.0);
    }

    #[test]
    fn new_record_serializes_without_id() {
        let car = CarDto {
            id: None,
            mark: "audi".into(),
            model: "a4".into(),
            generation_name: None,
            year: 2018,
            mileage: 90000,
            vol_engine: 2.0,
            fuel: "diesel".into(),
            city: "Poznań".into(),
            province: "Wielkopolskie".into(),
            price: 79000.0,
        };
        let value = serde_json::to_value(&car).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["fuel"], "diesel");
    }
}
