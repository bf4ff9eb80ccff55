use super::aggregate::CarDto;
use super::form::{CarField, CarForm, CarFormStep};
use crate::shared::field_errors::FieldErrors;
use crate::shared::stepper::Stepper;

/// State machine behind the three-step car editor.
///
/// `Vehicle -> Location -> PriceSummary`. Advancing requires the current step
/// to validate; going back is always allowed; jumping forward is not.
#[derive(Debug, Clone, PartialEq)]
pub struct CarEditor {
    pub form: CarForm,
    pub errors: FieldErrors<CarField>,
    stepper: Stepper,
    current_year: i32,
}

impl CarEditor {
    pub fn new(form: CarForm, current_year: i32) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            stepper: Stepper::new(CarFormStep::ALL.len()),
            current_year,
        }
    }

    pub fn step(&self) -> CarFormStep {
        CarFormStep::from_index(self.stepper.active()).unwrap_or(CarFormStep::Vehicle)
    }

    pub fn is_last_step(&self) -> bool {
        self.stepper.is_last()
    }

    pub fn is_step_completed(&self, step: CarFormStep) -> bool {
        self.stepper.is_completed(step.index())
    }

    pub fn can_jump_to(&self, step: CarFormStep) -> bool {
        self.stepper.can_jump_to(step.index())
    }

    /// Updates one input and clears that input's previous error only.
    pub fn set_field(&mut self, field: CarField, value: String) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Validates the current step and stores its errors.
    pub fn validate_current(&mut self) -> bool {
        self.errors = self.form.validate_step(self.step(), self.current_year);
        self.errors.is_empty()
    }

    /// Moves to the next step if the current one validates.
    pub fn advance(&mut self) -> bool {
        let valid = self.validate_current();
        self.stepper.advance(valid)
    }

    pub fn back(&mut self) {
        self.stepper.back();
    }

    pub fn jump_to(&mut self, step: CarFormStep) -> bool {
        self.stepper.jump_to(step.index())
    }

    /// Produces the record to submit.
    ///
    /// Every step is checked. On failure the editor moves back to the first
    /// step holding an error and shows that step's messages.
    pub fn prepare_submit(&mut self) -> Option<CarDto> {
        match self.form.to_dto(self.current_year) {
            Ok(dto) => {
                self.errors.clear_all();
                Some(dto)
            }
            Err(_) => {
                if let Some(step) = CarFormStep::ALL
                    .into_iter()
                    .find(|s| !self.form.validate_step(*s, self.current_year).is_empty())
                {
                    if step != self.step() {
                        self.stepper.jump_to(step.index());
                    }
                }
                self.validate_current();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn filled_vehicle_step() -> CarEditor {
        let mut editor = CarEditor::new(CarForm::default(), YEAR);
        editor.set_field(CarField::Mark, "Toyota".into());
        editor.set_field(CarField::Model, "Yaris".into());
        editor.set_field(CarField::Year, "2019".into());
        editor.set_field(CarField::Mileage, "45000".into());
        editor.set_field(CarField::VolEngine, "1.5".into());
        editor.set_field(CarField::Fuel, "hybrid".into());
        editor
    }

    #[test]
    fn advance_is_blocked_by_invalid_mileage() {
        let mut editor = filled_vehicle_step();
        editor.set_field(CarField::Mileage, "-5".into());

        assert!(!editor.advance());
        assert_eq!(editor.step(), CarFormStep::Vehicle);
        assert!(editor.errors.has(CarField::Mileage));
    }

    #[test]
    fn advance_moves_forward_when_valid() {
        let mut editor = filled_vehicle_step();
        assert!(editor.advance());
        assert_eq!(editor.step(), CarFormStep::Location);
        assert!(editor.errors.is_empty());
    }

    #[test]
    fn editing_clears_only_that_field_error() {
        let mut editor = CarEditor::new(CarForm::default(), YEAR);
        assert!(!editor.advance());
        assert!(editor.errors.has(CarField::Mark));
        assert!(editor.errors.has(CarField::Model));

        editor.set_field(CarField::Mark, "x".into());
        assert!(!editor.errors.has(CarField::Mark));
        assert!(editor.errors.has(CarField::Model));
    }

    #[test]
    fn back_always_succeeds_and_forward_jump_is_blocked() {
        let mut editor = filled_vehicle_step();
        editor.advance();
        editor.back();
        assert_eq!(editor.step(), CarFormStep::Vehicle);
        editor.back();
        assert_eq!(editor.step(), CarFormStep::Vehicle);
        assert!(!editor.jump_to(CarFormStep::PriceSummary));
    }

    #[test]
    fn submit_returns_record_when_all_steps_valid() {
        let mut editor = filled_vehicle_step();
        editor.advance();
        editor.set_field(CarField::City, "Wrocław".into());
        editor.set_field(CarField::Province, "Dolnośląskie".into());
        assert!(editor.advance());
        editor.set_field(CarField::Price, "58000".into());

        let dto = editor.prepare_submit().unwrap();
        assert_eq!(dto.city, "Wrocław");
        assert_eq!(dto.price, 58000.0);
    }

    #[test]
    fn submit_rewinds_to_first_failing_step() {
        let mut editor = filled_vehicle_step();
        editor.advance();
        editor.set_field(CarField::City, "Wrocław".into());
        editor.set_field(CarField::Province, "Dolnośląskie".into());
        editor.advance();
        editor.set_field(CarField::Price, "58000".into());
        // edited behind the editor's back, e.g. by a stale load
        editor.form.city.clear();

        assert!(editor.prepare_submit().is_none());
        assert_eq!(editor.step(), CarFormStep::Location);
        assert!(editor.errors.has(CarField::City));
    }
}
