//! Account page: profile, password change and account deletion.

use contracts::system::auth::SessionUser;
use contracts::system::users::{
    delete_confirmed, ChangePasswordForm, PasswordField, ProfileField, ProfileForm, UserProfile,
    ACCOUNT_DELETE_PHRASE,
};
use contracts::shared::field_errors::FieldErrors;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use crate::system::auth::guard::replace_navigation;
use thaw::*;

use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::context::use_session;
use crate::system::users::api;

const PROFILE_BANNER_MS: u32 = 2_000;
const PASSWORD_BANNER_MS: u32 = 5_000;

const LOAD_FAILED: &str = "Błąd podczas pobierania danych. Spróbuj ponownie później.";
const SAVE_FAILED: &str = "Wystąpił błąd podczas zapisywania danych";
const PASSWORD_FAILED: &str = "Wystąpił błąd podczas zmiany hasła";
const DELETE_FAILED: &str = "Wystąpił błąd podczas usuwania konta";

fn session_user(profile: &UserProfile) -> SessionUser {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    SessionUser {
        id: profile.id,
        username: profile.username.clone(),
        first_name: non_empty(&profile.first_name),
        last_name: non_empty(&profile.last_name),
        email: non_empty(&profile.email),
    }
}

/// Success banner that hides itself. A newer message cancels the pending hide.
#[derive(Clone, Copy)]
struct Flash {
    message: RwSignal<Option<String>>,
    seq: StoredValue<u64>,
}

impl Flash {
    fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            seq: StoredValue::new(0),
        }
    }

    fn show(&self, text: &str, hide_after_ms: u32) {
        let Some(ticket) = self.seq.try_update_value(|seq| {
            *seq += 1;
            *seq
        }) else {
            return;
        };
        let _ = self.message.try_set(Some(text.to_string()));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(hide_after_ms).await;
            if this.seq.try_get_value() == Some(ticket) {
                let _ = this.message.try_set(None);
            }
        });
    }

    fn clear(&self) {
        let _ = self.seq.try_update_value(|s| *s += 1);
        let _ = self.message.try_set(None);
    }
}

#[component]
fn FieldInput(
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group" class:form-group--error=move || error.with(|e| e.is_some())>
            <label>{label}</label>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error.get().map(|msg| view! { <span class="form-group__error">{msg}</span> })}
        </div>
    }
}

#[component]
pub fn AccountPage() -> impl IntoView {
    let session = use_session();
    let navigate = StoredValue::new_local(use_navigate());

    let saved = RwSignal::new(Option::<UserProfile>::None);
    let (is_loading, set_is_loading) = signal(true);
    let error_message = RwSignal::new(Option::<String>::None);
    let flash = Flash::new();

    let profile_form = RwSignal::new(ProfileForm::default());
    let profile_errors = RwSignal::new(FieldErrors::<ProfileField>::new());
    let is_editing_profile = RwSignal::new(false);

    let password_form = RwSignal::new(ChangePasswordForm::default());
    let password_errors = RwSignal::new(FieldErrors::<PasswordField>::new());
    let is_changing_password = RwSignal::new(false);

    let delete_open = RwSignal::new(false);
    let delete_input = RwSignal::new(String::new());
    let is_deleting = RwSignal::new(false);

    spawn_local(async move {
        match api::fetch_me().await {
            Ok(profile) => {
                let _ = profile_form.try_set(ProfileForm::from_profile(&profile));
                let _ = saved.try_set(Some(profile));
            }
            Err(e) => {
                log::error!("Failed to load profile: {}", e);
                let _ = error_message.try_set(Some(LOAD_FAILED.to_string()));
            }
        }
        let _ = set_is_loading.try_set(false);
    });

    let cancel_profile_edit = move || {
        if let Some(profile) = saved.get_untracked() {
            profile_form.set(ProfileForm::from_profile(&profile));
        }
        profile_errors.set(FieldErrors::new());
        is_editing_profile.set(false);
    };

    let save_profile = move || {
        let form = profile_form.get_untracked();
        let errors = form.validate();
        if !errors.is_empty() {
            profile_errors.set(errors);
            return;
        }
        profile_errors.set(FieldErrors::new());

        let Some(current) = saved.get_untracked() else {
            return;
        };
        let dto = form.changes_from(&current);
        if dto.is_empty() {
            is_editing_profile.set(false);
            return;
        }

        spawn_local(async move {
            match api::update_me(&dto).await {
                Ok(()) => {
                    let updated = UserProfile {
                        id: current.id,
                        username: form.username,
                        email: form.email,
                        first_name: form.first_name,
                        last_name: form.last_name,
                    };
                    if let Some(token) = session.token() {
                        session.login(&token, session_user(&updated));
                    }
                    let _ = saved.try_set(Some(updated));
                    let _ = is_editing_profile.try_set(false);
                    let _ = error_message.try_set(None);
                    flash.show("Dane profilu zostały zaktualizowane pomyślnie!", PROFILE_BANNER_MS);
                }
                Err(e) => {
                    log::error!("Failed to update profile: {}", e);
                    flash.clear();
                    let _ = error_message.try_set(Some(SAVE_FAILED.to_string()));
                }
            }
        });
    };

    let cancel_password_change = move || {
        password_form.set(ChangePasswordForm::default());
        password_errors.set(FieldErrors::new());
        is_changing_password.set(false);
    };

    let change_password = move || {
        let form = password_form.get_untracked();
        let errors = form.validate();
        if !errors.is_empty() {
            password_errors.set(errors);
            return;
        }
        password_errors.set(FieldErrors::new());

        let dto = form.to_dto();
        spawn_local(async move {
            match api::change_password(&dto).await {
                Ok(()) => {
                    let _ = password_form.try_set(ChangePasswordForm::default());
                    let _ = is_changing_password.try_set(false);
                    let _ = error_message.try_set(None);
                    flash.show("Hasło zostało zmienione pomyślnie!", PASSWORD_BANNER_MS);
                }
                Err(e) => {
                    log::error!("Failed to change password: {}", e);
                    flash.clear();
                    let _ = error_message.try_set(Some(PASSWORD_FAILED.to_string()));
                }
            }
        });
    };

    let close_delete_dialog = move || {
        delete_open.set(false);
        delete_input.set(String::new());
    };

    let delete_account = move || {
        if !delete_confirmed(&delete_input.get_untracked()) {
            return;
        }
        is_deleting.set(true);
        spawn_local(async move {
            match api::delete_me().await {
                Ok(()) => {
                    session.logout();
                    session.refresh_user();
                    let _ = navigate.try_with_value(|nav| nav("/", replace_navigation()));
                }
                Err(e) => {
                    log::error!("Failed to delete account: {}", e);
                    let _ = is_deleting.try_set(false);
                    let _ = delete_open.try_set(false);
                    let _ = error_message.try_set(Some(DELETE_FAILED.to_string()));
                }
            }
        });
    };

    let profile_field = move |field: ProfileField| {
        Signal::derive(move || {
            profile_form.with(|f| match field {
                ProfileField::FirstName => f.first_name.clone(),
                ProfileField::LastName => f.last_name.clone(),
                ProfileField::Username => f.username.clone(),
                ProfileField::Email => f.email.clone(),
            })
        })
    };
    let profile_error =
        move |field: ProfileField| Signal::derive(move || profile_errors.with(|e| e.get(field).map(str::to_string)));
    let set_profile = move |field: ProfileField| {
        Callback::new(move |value: String| {
            profile_form.update(|f| f.set(field, value));
            profile_errors.update(|e| e.clear(field));
        })
    };

    let password_field = move |field: PasswordField| {
        Signal::derive(move || {
            password_form.with(|f| match field {
                PasswordField::Current => f.current_password.clone(),
                PasswordField::New => f.new_password.clone(),
                PasswordField::Confirm => f.confirm_password.clone(),
            })
        })
    };
    let password_error =
        move |field: PasswordField| Signal::derive(move || password_errors.with(|e| e.get(field).map(str::to_string)));
    let set_password = move |field: PasswordField| {
        Callback::new(move |value: String| {
            password_form.update(|f| f.set(field, value));
            password_errors.update(|e| e.clear(field));
        })
    };

    view! {
        <PageFrame page_id="sys_account--system" category=PAGE_CAT_SYSTEM>
            <PageHeader
                title="Moje konto"
                subtitle="Zarządzaj swoimi danymi i ustawieniami"
                breadcrumbs=vec![("Panel", Some("/dashboard")), ("Moje konto", None)]
            />

            <div class="page__content">
                {move || flash.message.get().map(|msg| view! { <div class="success-message">{msg}</div> })}
                {move || error_message.get().map(|msg| view! { <div class="error-message">{msg}</div> })}

                <Show when=move || !is_loading.get() fallback=|| view! { <Spinner label="Ładowanie..." /> }>
                    <div class="account-grid">
                        <Card>
                            <div class="account-profile">
                                <div class="avatar avatar--large">
                                    {move || saved.with(|p| p.as_ref().map(|p| session_user(p).initials()))}
                                </div>
                                <h2>{move || saved.with(|p| p.as_ref().map(|p| format!("{} {}", p.first_name, p.last_name)))}</h2>
                                <p class="text-secondary">{move || saved.with(|p| p.as_ref().map(|p| p.username.clone()))}</p>
                                <p class="text-secondary">{move || saved.with(|p| p.as_ref().map(|p| p.email.clone()))}</p>
                            </div>
                        </Card>

                        <Card>
                            <div class="card-section">
                                <div class="card-section__header">
                                    <h3>"Dane osobowe"</h3>
                                    <Show when=move || !is_editing_profile.get()>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Secondary
                                            on_click=move |_| is_editing_profile.set(true)
                                        >
                                            {icon("edit")}
                                            " Edytuj"
                                        </Button>
                                    </Show>
                                </div>
                                <Show
                                    when=move || is_editing_profile.get()
                                    fallback=move || view! {
                                        <dl class="detail-list">
                                            <dt>"Imię"</dt><dd>{move || profile_field(ProfileField::FirstName).get()}</dd>
                                            <dt>"Nazwisko"</dt><dd>{move || profile_field(ProfileField::LastName).get()}</dd>
                                            <dt>"Nazwa użytkownika"</dt><dd>{move || profile_field(ProfileField::Username).get()}</dd>
                                            <dt>"Email"</dt><dd>{move || profile_field(ProfileField::Email).get()}</dd>
                                        </dl>
                                    }
                                >
                                    <FieldInput label="Imię" value=profile_field(ProfileField::FirstName) error=profile_error(ProfileField::FirstName) on_input=set_profile(ProfileField::FirstName) />
                                    <FieldInput label="Nazwisko" value=profile_field(ProfileField::LastName) error=profile_error(ProfileField::LastName) on_input=set_profile(ProfileField::LastName) />
                                    <FieldInput label="Nazwa użytkownika" value=profile_field(ProfileField::Username) error=profile_error(ProfileField::Username) on_input=set_profile(ProfileField::Username) />
                                    <FieldInput label="Email" input_type="email" value=profile_field(ProfileField::Email) error=profile_error(ProfileField::Email) on_input=set_profile(ProfileField::Email) />
                                    <div class="form-actions">
                                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel_profile_edit()>"Anuluj"</Button>
                                        <Button appearance=ButtonAppearance::Primary on_click=move |_| save_profile()>"Zapisz"</Button>
                                    </div>
                                </Show>
                            </div>
                        </Card>

                        <Card>
                            <div class="card-section">
                                <div class="card-section__header">
                                    <h3>"Bezpieczeństwo"</h3>
                                </div>
                                <Show
                                    when=move || is_changing_password.get()
                                    fallback=move || view! {
                                        <Button
                                            appearance=ButtonAppearance::Secondary
                                            on_click=move |_| is_changing_password.set(true)
                                        >
                                            "Zmień hasło"
                                        </Button>
                                    }
                                >
                                    <FieldInput label="Aktualne hasło" input_type="password" value=password_field(PasswordField::Current) error=password_error(PasswordField::Current) on_input=set_password(PasswordField::Current) />
                                    <FieldInput label="Nowe hasło" input_type="password" value=password_field(PasswordField::New) error=password_error(PasswordField::New) on_input=set_password(PasswordField::New) />
                                    <FieldInput label="Potwierdź nowe hasło" input_type="password" value=password_field(PasswordField::Confirm) error=password_error(PasswordField::Confirm) on_input=set_password(PasswordField::Confirm) />
                                    <div class="form-actions">
                                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel_password_change()>"Anuluj"</Button>
                                        <Button appearance=ButtonAppearance::Primary on_click=move |_| change_password()>"Zmień hasło"</Button>
                                    </div>
                                </Show>
                            </div>
                        </Card>

                        <Card class="card--danger">
                            <div class="card-section">
                                <div class="card-section__header">
                                    <h3>"Strefa niebezpieczna"</h3>
                                </div>
                                <div class="warning-box">
                                    <strong>"Uwaga! "</strong>
                                    "Usunięcie konta jest nieodwracalne. Wszystkie Twoje dane, w tym samochody i statystyki, zostaną trwale usunięte."
                                </div>
                                <button class="btn-danger btn-block" on:click=move |_| delete_open.set(true)>
                                    {icon("delete")}
                                    " Usuń konto"
                                </button>
                            </div>
                        </Card>
                    </div>
                </Show>
            </div>

            <Dialog open=delete_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Potwierdzenie usunięcia konta"</DialogTitle>
                        <DialogContent>
                            <p>
                                "Ta operacja jest " <strong>"nieodwracalna"</strong>
                                ". Wszystkie Twoje dane zostaną trwale usunięte."
                            </p>
                            <p>
                                "Aby potwierdzić usunięcie konta, wpisz dokładnie: "
                                <strong>{ACCOUNT_DELETE_PHRASE}</strong>
                            </p>
                            <Input value=delete_input placeholder=ACCOUNT_DELETE_PHRASE />
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| close_delete_dialog()>
                                "Anuluj"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                class="btn-danger"
                                disabled=Signal::derive(move || {
                                    !delete_input.with(|v| delete_confirmed(v)) || is_deleting.get()
                                })
                                on_click=move |_| delete_account()
                            >
                                "Usuń konto na zawsze"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_maps_to_session_user() {
        let profile = UserProfile {
            id: Some(3),
            username: "anowak".into(),
            email: "a@x.pl".into(),
            first_name: "Anna".into(),
            last_name: String::new(),
        };
        let user = session_user(&profile);
        assert_eq!(user.first_name.as_deref(), Some("Anna"));
        assert_eq!(user.last_name, None);
        assert_eq!(user.initials(), "AN");
    }
}
