use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::{api, context::use_session};

const INVALID_CREDENTIALS: &str = "Nieprawidłowa nazwa użytkownika lub hasło";
const LOGIN_FAILED: &str = "Wystąpił błąd podczas logowania. Spróbuj ponownie.";

fn login_error_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::Unauthorized { .. } => INVALID_CREDENTIALS,
        // Older servers answer bad credentials with 400
        ApiError::Server { status: 400, .. } => INVALID_CREDENTIALS,
        _ => LOGIN_FAILED,
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let session = use_session();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(response) => {
                    session.login(&response.token, response.user());
                    set_is_loading.set(false);
                    navigate(
                        "/dashboard",
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error_message.set(Some(login_error_message(&e).to_string()));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <PageFrame page_id="sys_login--system" category=PAGE_CAT_SYSTEM>
            <div class="auth-box">
                <h1>"Witaj ponownie!"</h1>
                <p class="auth-box__subtitle">"Zaloguj się, aby kontynuować pracę"</p>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Nazwa użytkownika *"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Hasło *"</label>
                        <div class="input-with-action">
                            <input
                                type=move || if show_password.get() { "text" } else { "password" }
                                id="password"
                                autocomplete="current-password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                            <button
                                type="button"
                                class="btn-link"
                                on:click=move |_| set_show_password.update(|v| *v = !*v)
                            >
                                {move || if show_password.get() { "Ukryj" } else { "Pokaż" }}
                            </button>
                        </div>
                    </div>

                    <button
                        type="submit"
                        class="btn-primary btn-block"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Logowanie..." } else { "Zaloguj się" }}
                    </button>
                </form>

                <p class="auth-box__footer">
                    "Nie masz konta? "
                    <A href="/register">"Zarejestruj się"</A>
                </p>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_credentials_get_a_specific_message() {
        let err = ApiError::from_status(401, r#"{"detail":"Invalid"}"#);
        assert_eq!(login_error_message(&err), INVALID_CREDENTIALS);
        assert_eq!(login_error_message(&ApiError::from_status(400, "")), INVALID_CREDENTIALS);
        assert_eq!(login_error_message(&ApiError::Network("offline".into())), LOGIN_FAILED);
    }
}
