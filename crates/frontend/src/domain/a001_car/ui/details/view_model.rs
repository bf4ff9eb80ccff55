use crate::domain::a001_car::api;
use contracts::domain::a001_car::{CarEditor, CarField, CarForm, CarFormStep, CarId};
use contracts::domain::a001_car::form::current_year;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Delay between the success banner and the redirect to the list
pub const REDIRECT_DELAY_MS: u32 = 2_000;

/// Runs a page callback unless the editor was unmounted in the meantime.
fn run_if_mounted(callback: Callback<()>) -> bool {
    if callback.try_run(()).is_none() {
        log::debug!("Editor was left before the pending navigation");
        return false;
    }
    true
}

/// ViewModel for the car editor (create and edit)
///
/// - `editor` holds the raw inputs, per-field errors and the step position
/// - commands: load, next, back, jump, submit
#[derive(Clone, Copy)]
pub struct CarDetailsViewModel {
    pub editor: RwSignal<CarEditor>,
    pub car_id: Option<CarId>,
    pub is_loading: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    pub submit_error: RwSignal<Option<String>>,
    pub submit_success: RwSignal<bool>,
}

impl CarDetailsViewModel {
    pub fn new(car_id: Option<CarId>) -> Self {
        Self {
            editor: RwSignal::new(CarEditor::new(CarForm::default(), current_year())),
            car_id,
            is_loading: RwSignal::new(car_id.is_some()),
            is_submitting: RwSignal::new(false),
            submit_error: RwSignal::new(None),
            submit_success: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.car_id.is_some()
    }

    pub fn success_message(&self) -> &'static str {
        if self.is_edit_mode() {
            "Samochód został pomyślnie zaktualizowany! Przekierowywanie do listy samochodów..."
        } else {
            "Samochód został pomyślnie dodany! Przekierowywanie do listy samochodów..."
        }
    }

    fn failure_message(&self) -> &'static str {
        if self.is_edit_mode() {
            "Wystąpił błąd podczas edytowania samochodu"
        } else {
            "Wystąpił błąd podczas dodawania samochodu"
        }
    }

    /// Loads the record in edit mode. `on_missing` runs when it cannot be fetched.
    pub fn load(&self, on_missing: Callback<()>) {
        let Some(id) = self.car_id else {
            return;
        };
        let editor = self.editor;
        let is_loading = self.is_loading;
        spawn_local(async move {
            match api::fetch_by_id(id).await {
                Ok(car) => {
                    let _ = editor.try_set(CarEditor::new(CarForm::from_dto(&car), current_year()));
                    let _ = is_loading.try_set(false);
                }
                Err(e) => {
                    log::error!("Failed to load car {}: {}", id, e);
                    run_if_mounted(on_missing);
                }
            }
        });
    }

    pub fn set_field(&self, field: CarField, value: String) {
        self.editor.update(|e| e.set_field(field, value));
    }

    pub fn next(&self) {
        self.submit_error.set(None);
        self.editor.update(|e| {
            e.advance();
        });
    }

    pub fn back(&self) {
        self.editor.update(|e| e.back());
    }

    pub fn jump_to(&self, step: CarFormStep) {
        self.editor.update(|e| {
            e.jump_to(step);
        });
    }

    /// Validates every step and sends the record.
    ///
    /// On success shows the banner and runs `on_saved` after [`REDIRECT_DELAY_MS`].
    /// On failure the editor stays on its step and the server body is shown.
    pub fn submit(&self, on_saved: Callback<()>) {
        if self.is_submitting.get_untracked() || self.submit_success.get_untracked() {
            return;
        }
        let Some(dto) = self.editor.try_update(|e| e.prepare_submit()).flatten() else {
            return;
        };

        self.is_submitting.set(true);
        self.submit_error.set(None);

        let this = *self;
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(()) => {
                    let _ = this.is_submitting.try_set(false);
                    let _ = this.submit_success.try_set(true);
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    run_if_mounted(on_saved);
                }
                Err(e) => {
                    log::error!("Failed to save car: {}", e);
                    let _ = this.is_submitting.try_set(false);
                    let _ = this
                        .submit_error
                        .try_set(Some(e.user_message(this.failure_message())));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_callback(runs: &Arc<AtomicUsize>) -> Callback<()> {
        let runs = Arc::clone(runs);
        Callback::new(move |_| {
            runs.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn callback_runs_while_page_is_mounted() {
        let owner = Owner::new();
        owner.set();
        let runs = Arc::new(AtomicUsize::new(0));

        assert!(run_if_mounted(counting_callback(&runs)));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_is_skipped_after_page_is_left() {
        let root = Owner::new();
        root.set();
        let runs = Arc::new(AtomicUsize::new(0));

        let page = root.child();
        let on_saved = page.with(|| counting_callback(&runs));
        page.cleanup();
        drop(page);

        assert!(!run_if_mounted(on_saved));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
