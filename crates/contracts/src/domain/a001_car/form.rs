use chrono::Datelike;

use super::aggregate::{CarDto, CarId, Fuel, Province};
use crate::shared::field_errors::FieldErrors;

/// Earliest accepted production year
pub const MIN_YEAR: i32 = 1900;

/// Latest accepted production year is next year's models
pub fn max_year(current_year: i32) -> i32 {
    current_year + 1
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CarField {
    Mark,
    Model,
    GenerationName,
    Year,
    Mileage,
    VolEngine,
    Fuel,
    City,
    Province,
    Price,
}

impl CarField {
    pub fn label(&self) -> &'static str {
        match self {
            CarField::Mark => "Marka",
            CarField::Model => "Model",
            CarField::GenerationName => "Nazwa generacji",
            CarField::Year => "Rok produkcji",
            CarField::Mileage => "Przebieg (km)",
            CarField::VolEngine => "Pojemność silnika (l)",
            CarField::Fuel => "Rodzaj paliwa",
            CarField::City => "Miasto",
            CarField::Province => "Województwo",
            CarField::Price => "Cena (zł)",
        }
    }
}

/// The three editor steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarFormStep {
    Vehicle,
    Location,
    PriceSummary,
}

impl CarFormStep {
    pub const ALL: [CarFormStep; 3] = [
        CarFormStep::Vehicle,
        CarFormStep::Location,
        CarFormStep::PriceSummary,
    ];

    pub fn index(&self) -> usize {
        match self {
            CarFormStep::Vehicle => 0,
            CarFormStep::Location => 1,
            CarFormStep::PriceSummary => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<CarFormStep> {
        CarFormStep::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CarFormStep::Vehicle => "Dane pojazdu",
            CarFormStep::Location => "Lokalizacja",
            CarFormStep::PriceSummary => "Cena i podsumowanie",
        }
    }

    pub fn fields(&self) -> &'static [CarField] {
        match self {
            CarFormStep::Vehicle => &[
                CarField::Mark,
                CarField::Model,
                CarField::GenerationName,
                CarField::Year,
                CarField::Mileage,
                CarField::VolEngine,
                CarField::Fuel,
            ],
            CarFormStep::Location => &[CarField::City, CarField::Province],
            CarFormStep::PriceSummary => &[CarField::Price],
        }
    }
}

/// Raw text of every editor input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarForm {
    pub id: Option<CarId>,
    pub mark: String,
    pub model: String,
    pub generation_name: String,
    pub year: String,
    pub mileage: String,
    pub vol_engine: String,
    pub fuel: String,
    pub city: String,
    pub province: String,
    pub price: String,
}

impl CarForm {
    pub fn from_dto(dto: &CarDto) -> Self {
        Self {
            id: dto.id,
            mark: dto.mark.clone(),
            model: dto.model.clone(),
            generation_name: dto.generation_name.clone().unwrap_or_default(),
            year: dto.year.to_string(),
            mileage: dto.mileage.to_string(),
            vol_engine: dto.vol_engine.to_string(),
            fuel: dto.fuel.trim().to_string(),
            city: dto.city.clone(),
            province: Province::parse(&dto.province)
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| dto.province.clone()),
            price: dto.price.to_string(),
        }
    }

    pub fn get(&self, field: CarField) -> &str {
        match field {
            CarField::Mark => &self.mark,
            CarField::Model => &self.model,
            CarField::GenerationName => &self.generation_name,
            CarField::Year => &self.year,
            CarField::Mileage => &self.mileage,
            CarField::VolEngine => &self.vol_engine,
            CarField::Fuel => &self.fuel,
            CarField::City => &self.city,
            CarField::Province => &self.province,
            CarField::Price => &self.price,
        }
    }

    pub fn set(&mut self, field: CarField, value: String) {
        let slot = match field {
            CarField::Mark => &mut self.mark,
            CarField::Model => &mut self.model,
            CarField::GenerationName => &mut self.generation_name,
            CarField::Year => &mut self.year,
            CarField::Mileage => &mut self.mileage,
            CarField::VolEngine => &mut self.vol_engine,
            CarField::Fuel => &mut self.fuel,
            CarField::City => &mut self.city,
            CarField::Province => &mut self.province,
            CarField::Price => &mut self.price,
        };
        *slot = value;
    }

    /// Validates the fields of one step. Other steps are not looked at.
    pub fn validate_step(&self, step: CarFormStep, current_year: i32) -> FieldErrors<CarField> {
        let mut errors = FieldErrors::new();

        match step {
            CarFormStep::Vehicle => {
                require(&mut errors, CarField::Mark, &self.mark, "Marka jest wymagana");
                require(&mut errors, CarField::Model, &self.model, "Model jest wymagany");

                if require(&mut errors, CarField::Year, &self.year, "Rok jest wymagany")
                    && parse_year(&self.year, current_year).is_none()
                {
                    errors.insert(CarField::Year, "Proszę podać prawidłowy rok");
                }
                if require(&mut errors, CarField::Mileage, &self.mileage, "Przebieg jest wymagany")
                    && parse_mileage(&self.mileage).is_none()
                {
                    errors.insert(CarField::Mileage, "Proszę podać prawidłowy przebieg");
                }
                if require(
                    &mut errors,
                    CarField::VolEngine,
                    &self.vol_engine,
                    "Pojemność silnika jest wymagana",
                ) && parse_vol_engine(&self.vol_engine).is_none()
                {
                    errors.insert(CarField::VolEngine, "Proszę podać prawidłową pojemność silnika");
                }
                if require(&mut errors, CarField::Fuel, &self.fuel, "Rodzaj paliwa jest wymagany")
                    && Fuel::parse(&self.fuel).is_none()
                {
                    errors.insert(CarField::Fuel, "Nieprawidłowy rodzaj paliwa");
                }
            }
            CarFormStep::Location => {
                require(&mut errors, CarField::City, &self.city, "Miasto jest wymagane");
                if require(&mut errors, CarField::Province, &self.province, "Województwo jest wymagane")
                    && Province::parse(&self.province).is_none()
                {
                    errors.insert(CarField::Province, "Nieprawidłowe województwo");
                }
            }
            CarFormStep::PriceSummary => {
                if require(&mut errors, CarField::Price, &self.price, "Cena jest wymagana")
                    && parse_price(&self.price).is_none()
                {
                    errors.insert(CarField::Price, "Proszę podać prawidłową cenę");
                }
            }
        }

        errors
    }

    /// Validates every step and converts the form into a record.
    pub fn to_dto(&self, current_year: i32) -> Result<CarDto, FieldErrors<CarField>> {
        let mut errors = FieldErrors::new();
        for step in CarFormStep::ALL {
            errors.extend(self.validate_step(step, current_year));
        }

        match (
            parse_year(&self.year, current_year),
            parse_mileage(&self.mileage),
            parse_vol_engine(&self.vol_engine),
            Fuel::parse(&self.fuel),
            Province::parse(&self.province),
            parse_price(&self.price),
        ) {
            (Some(year), Some(mileage), Some(vol_engine), Some(_), Some(province), Some(price))
                if errors.is_empty() =>
            {
                let generation_name = self.generation_name.trim();
                Ok(CarDto {
                    id: self.id,
                    mark: self.mark.trim().to_string(),
                    model: self.model.trim().to_string(),
                    generation_name: (!generation_name.is_empty())
                        .then(|| generation_name.to_string()),
                    year,
                    mileage,
                    vol_engine,
                    fuel: self.fuel.trim().to_string(),
                    city: self.city.trim().to_string(),
                    province: province.as_str().to_string(),
                    price,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Records a "required" error for a blank value. Returns whether the value is present.
fn require(errors: &mut FieldErrors<CarField>, field: CarField, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, message);
        false
    } else {
        true
    }
}

pub fn parse_year(value: &str, current_year: i32) -> Option<i32> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (MIN_YEAR..=max_year(current_year)).contains(y))
}

pub fn parse_mileage(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|m| *m >= 0)
}

pub fn parse_vol_engine(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

pub fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn valid_form() -> CarForm {
        CarForm {
            id: Some(3),
            mark: "Skoda".into(),
            model: "Octavia".into(),
            generation_name: "III".into(),
            year: "2017".into(),
            mileage: "154000".into(),
            vol_engine: "1.6".into(),
            fuel: "diesel".into(),
            city: "Gdańsk".into(),
            province: "pomorskie".into(),
            price: "41500".into(),
        }
    }

    #[test]
    fn year_range_is_closed() {
        assert_eq!(parse_year("1900", YEAR), Some(1900));
        assert_eq!(parse_year("2027", YEAR), Some(2027));
        assert_eq!(parse_year("1899", YEAR), None);
        assert_eq!(parse_year("2028", YEAR), None);
        assert_eq!(parse_year("abc", YEAR), None);
        assert_eq!(parse_year("2010.5", YEAR), None);
    }

    #[test]
    fn negative_mileage_is_rejected() {
        let mut form = valid_form();
        form.mileage = "-5".into();
        let errors = form.validate_step(CarFormStep::Vehicle, YEAR);
        assert_eq!(errors.get(CarField::Mileage), Some("Proszę podać prawidłowy przebieg"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn engine_volume_must_be_positive() {
        assert_eq!(parse_vol_engine("0"), None);
        assert_eq!(parse_vol_engine("-1.2"), None);
        assert_eq!(parse_vol_engine("NaN"), None);
        assert_eq!(parse_vol_engine("1.9"), Some(1.9));
    }

    #[test]
    fn missing_fields_report_required() {
        let form = CarForm::default();
        let errors = form.validate_step(CarFormStep::Vehicle, YEAR);
        assert_eq!(errors.get(CarField::Mark), Some("Marka jest wymagana"));
        assert_eq!(errors.get(CarField::Year), Some("Rok jest wymagany"));
        assert!(!errors.has(CarField::GenerationName));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn steps_validate_independently() {
        let mut form = valid_form();
        form.price = String::new();
        assert!(form.validate_step(CarFormStep::Vehicle, YEAR).is_empty());
        assert!(form.validate_step(CarFormStep::Location, YEAR).is_empty());
        assert!(form.validate_step(CarFormStep::PriceSummary, YEAR).has(CarField::Price));
    }

    #[test]
    fn province_outside_list_is_rejected() {
        let mut form = valid_form();
        form.province = "Bavaria".into();
        let errors = form.validate_step(CarFormStep::Location, YEAR);
        assert_eq!(errors.get(CarField::Province), Some("Nieprawidłowe województwo"));
    }

    #[test]
    fn price_accepts_zero_rejects_negative() {
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-1"), None);
    }

    #[test]
    fn to_dto_normalizes_values() {
        let dto = valid_form().to_dto(YEAR).unwrap();
        assert_eq!(dto.id, Some(3));
        assert_eq!(dto.year, 2017);
        assert_eq!(dto.fuel, "diesel");
        assert_eq!(dto.province, "Pomorskie");
        assert_eq!(dto.generation_name.as_deref(), Some("III"));
    }

    #[test]
    fn to_dto_collects_errors_of_all_steps() {
        let mut form = valid_form();
        form.mark.clear();
        form.city.clear();
        let errors = form.to_dto(YEAR).unwrap_err();
        assert!(errors.has(CarField::Mark));
        assert!(errors.has(CarField::City));
    }

    #[test]
    fn from_dto_round_trips_through_validation() {
        let dto = valid_form().to_dto(YEAR).unwrap();
        let form = CarForm::from_dto(&dto);
        assert_eq!(form.to_dto(YEAR).unwrap(), dto);
    }

    #[test]
    fn stored_fuel_is_sent_back_unchanged() {
        let mut dto = valid_form().to_dto(YEAR).unwrap();
        dto.fuel = "Benzyna".into();

        let mut form = CarForm::from_dto(&dto);
        form.price = "39900".into();
        let saved = form.to_dto(YEAR).unwrap();

        assert_eq!(saved.fuel, "Benzyna");
        assert_eq!(saved.price, 39900.0);
        let body = serde_json::to_value(&saved).unwrap();
        assert_eq!(body["fuel"], "Benzyna");
    }

    #[test]
    fn unknown_stored_fuel_is_shown_and_flagged() {
        let mut dto = valid_form().to_dto(YEAR).unwrap();
        dto.fuel = "Hydrogen".into();

        let form = CarForm::from_dto(&dto);
        assert_eq!(form.fuel, "Hydrogen");
        let errors = form.validate_step(CarFormStep::Vehicle, YEAR);
        assert_eq!(errors.get(CarField::Fuel), Some("Nieprawidłowy rodzaj paliwa"));
    }
}
