/// Position inside a linear multi-step form.
///
/// Moving forward is guarded by the caller's validation result; moving
/// backward is never guarded. Forward jumps past the next step are not
/// possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    active: usize,
    count: usize,
}

impl Stepper {
    /// Creates a stepper positioned on the first of `count` steps.
    /// A zero count is treated as a single step.
    pub fn new(count: usize) -> Self {
        Self {
            active: 0,
            count: count.max(1),
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 == self.count
    }

    /// A step counts as completed once the user has moved past it.
    pub fn is_completed(&self, step: usize) -> bool {
        step < self.active
    }

    /// Moves to the next step when `step_is_valid` holds.
    /// Returns whether the position changed.
    pub fn advance(&mut self, step_is_valid: bool) -> bool {
        if !step_is_valid || self.is_last() {
            return false;
        }
        self.active += 1;
        true
    }

    /// Moves one step back. On the first step this stays put.
    pub fn back(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn can_jump_to(&self, step: usize) -> bool {
        step < self.active
    }

    /// Jumps back to an already completed step. Forward jumps are refused.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if !self.can_jump_to(step) {
            return false;
        }
        self.active = step;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_requires_valid_step() {
        let mut stepper = Stepper::new(3);
        assert!(!stepper.advance(false));
        assert_eq!(stepper.active(), 0);
        assert!(stepper.advance(true));
        assert_eq!(stepper.active(), 1);
    }

    #[test]
    fn advance_stops_on_last_step() {
        let mut stepper = Stepper::new(2);
        assert!(stepper.advance(true));
        assert!(stepper.is_last());
        assert!(!stepper.advance(true));
        assert_eq!(stepper.active(), 1);
    }

    #[test]
    fn back_is_unconditional_and_saturates() {
        let mut stepper = Stepper::new(3);
        stepper.back();
        assert_eq!(stepper.active(), 0);
        stepper.advance(true);
        stepper.advance(true);
        stepper.back();
        assert_eq!(stepper.active(), 1);
    }

    #[test]
    fn jump_only_to_completed_steps() {
        let mut stepper = Stepper::new(3);
        assert!(!stepper.jump_to(2));
        stepper.advance(true);
        stepper.advance(true);
        assert!(stepper.is_completed(0));
        assert!(!stepper.jump_to(2));
        assert!(stepper.jump_to(0));
        assert_eq!(stepper.active(), 0);
        assert!(!stepper.jump_to(1));
    }

    #[test]
    fn zero_steps_behaves_as_single_step() {
        let stepper = Stepper::new(0);
        assert_eq!(stepper.count(), 1);
        assert!(stepper.is_first() && stepper.is_last());
    }
}
