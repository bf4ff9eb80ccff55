use contracts::system::auth::{RegisterField, RegisterForm, RegisterWizard, REGISTER_STEPS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::{api, context::use_session};

const REGISTER_FAILED: &str = "Wystąpił błąd podczas rejestracji. Spróbuj ponownie.";

fn field_value(form: &RegisterForm, field: RegisterField) -> &str {
    match field {
        RegisterField::Username => &form.username,
        RegisterField::Email => &form.email,
        RegisterField::Password => &form.password,
        RegisterField::ConfirmPassword => &form.confirm_password,
        RegisterField::FirstName => &form.first_name,
        RegisterField::LastName => &form.last_name,
    }
}

fn field_mut(form: &mut RegisterForm, field: RegisterField) -> &mut String {
    match field {
        RegisterField::Username => &mut form.username,
        RegisterField::Email => &mut form.email,
        RegisterField::Password => &mut form.password,
        RegisterField::ConfirmPassword => &mut form.confirm_password,
        RegisterField::FirstName => &mut form.first_name,
        RegisterField::LastName => &mut form.last_name,
    }
}

/// Text input bound to one field of the wizard form.
#[component]
fn WizardInput(
    wizard: RwSignal<RegisterWizard>,
    field: RegisterField,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] autocomplete: &'static str,
) -> impl IntoView {
    let id = format!("register-{:?}", field).to_lowercase();
    view! {
        <div class="form-group" class:form-group--error=move || wizard.with(|w| w.errors.has(field))>
            <label for=id.clone()>{label}</label>
            <input
                type=input_type
                id=id
                autocomplete=autocomplete
                prop:value=move || wizard.with(|w| field_value(&w.form, field).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| {
                        *field_mut(&mut w.form, field) = value;
                        w.errors.clear(field);
                    });
                }
            />
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let wizard = RwSignal::new(RegisterWizard::default());
    let (server_error, set_server_error) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let session = use_session();
    let navigate = use_navigate();

    // Memoized so typing does not rebuild the step's inputs
    let step = Memo::new(move |_| wizard.with(|w| w.step()));

    let on_next = move |_| {
        set_server_error.set(None);
        wizard.update(|w| {
            w.advance();
        });
    };

    let on_back = {
        let navigate = navigate.clone();
        move |_| {
            if step.get() == 0 {
                navigate("/login", Default::default());
            } else {
                wizard.update(|w| w.back());
            }
        }
    };

    let on_submit = move |_| {
        let request = wizard.with_untracked(|w| w.form.to_request());
        set_is_submitting.set(true);
        set_server_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&request).await {
                Ok(response) => {
                    session.login(&response.token, response.user);
                    set_is_submitting.set(false);
                    navigate(
                        "/dashboard",
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                Err(e) => {
                    log::warn!("Registration failed: {}", e);
                    set_server_error.set(Some(e.field_messages(REGISTER_FAILED)));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    let step_content = move || match step.get() {
        0 => view! {
            <WizardInput wizard=wizard field=RegisterField::Username label="Nazwa użytkownika *" autocomplete="username" />
            <WizardInput wizard=wizard field=RegisterField::Email label="Email *" input_type="email" autocomplete="email" />
            <WizardInput wizard=wizard field=RegisterField::Password label="Hasło *" input_type="password" autocomplete="new-password" />
            <WizardInput wizard=wizard field=RegisterField::ConfirmPassword label="Potwierdź hasło *" input_type="password" autocomplete="new-password" />
        }
        .into_any(),
        1 => view! {
            <WizardInput wizard=wizard field=RegisterField::FirstName label="Imię *" autocomplete="given-name" />
            <WizardInput wizard=wizard field=RegisterField::LastName label="Nazwisko *" autocomplete="family-name" />
        }
        .into_any(),
        _ => {
            let form = wizard.with_untracked(|w| w.form.clone());
            view! {
                <div class="info-message">
                    "Sprawdź poprawność wprowadzonych danych przed zakończeniem rejestracji."
                </div>
                <div class="summary-section">
                    <h3>"Dane konta"</h3>
                    <p><strong>"Nazwa użytkownika: "</strong>{form.username}</p>
                    <p><strong>"Email: "</strong>{form.email}</p>
                </div>
                <div class="summary-section">
                    <h3>"Dane osobowe"</h3>
                    <p><strong>"Imię: "</strong>{form.first_name}</p>
                    <p><strong>"Nazwisko: "</strong>{form.last_name}</p>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <PageFrame page_id="sys_register--system" category=PAGE_CAT_SYSTEM>
            <div class="auth-box auth-box--wide">
                <h1>"Utwórz konto"</h1>
                <p class="auth-box__subtitle">"Dołącz do systemu zarządzania danymi samochodowymi"</p>

                <ol class="stepper">
                    {REGISTER_STEPS
                        .iter()
                        .enumerate()
                        .map(|(i, label)| {
                            view! {
                                <li
                                    class="stepper__step"
                                    class:stepper__step--active=move || step.get() == i
                                    class:stepper__step--done=move || wizard.with(|w| w.is_step_completed(i))
                                    on:click=move |_| {
                                        wizard.update(|w| {
                                            w.jump_to(i);
                                        });
                                    }
                                >
                                    <span class="stepper__index">{i + 1}</span>
                                    <span class="stepper__label">{*label}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>

                {move || wizard.with(|w| w.error_message()).map(|msg| view! {
                    <div class="error-message">{msg}</div>
                })}
                {move || server_error.get().map(|msg| view! {
                    <div class="error-message error-message--multiline">{msg}</div>
                })}

                <div class="stepper__content">{step_content}</div>

                <div class="stepper__actions">
                    <button type="button" class="btn-secondary" on:click=on_back>
                        {move || if step.get() == 0 { "Mam już konto" } else { "Wstecz" }}
                    </button>
                    <Show
                        when=move || wizard.with(|w| w.is_last_step())
                        fallback=move || view! {
                            <button type="button" class="btn-primary" on:click=on_next>"Dalej"</button>
                        }
                    >
                        <button
                            type="button"
                            class="btn-primary"
                            disabled=move || is_submitting.get()
                            on:click=on_submit.clone()
                        >
                            {move || if is_submitting.get() { "Rejestracja..." } else { "Zarejestruj się" }}
                        </button>
                    </Show>
                </div>

                <p class="auth-box__footer">
                    "Masz już konto? "
                    <A href="/login">"Zaloguj się"</A>
                </p>
            </div>
        </PageFrame>
    }
}
