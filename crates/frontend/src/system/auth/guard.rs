use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::NavigateOptions;
use thaw::*;

use super::context::{use_session, SessionStatus};

/// Navigation that replaces the current history entry
pub fn replace_navigation() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

/// Redirect that Back does not return to.
pub fn replace_redirect(path: &'static str) -> impl IntoView {
    view! { <Redirect path=path options=replace_navigation() /> }
}

#[component]
fn SessionLoading() -> impl IntoView {
    view! {
        <div class="session-loading">
            <Spinner label="Ładowanie..." />
        </div>
    }
}

/// Renders children for a logged-in user, otherwise redirects to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match session.status() {
        SessionStatus::Loading => view! { <SessionLoading /> }.into_any(),
        SessionStatus::Authenticated => children().into_any(),
        SessionStatus::Guest => replace_redirect("/login").into_any(),
    }
}

/// Renders children only for guests (login, register); logged-in users go to `/`.
#[component]
pub fn RequireGuest(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match session.status() {
        SessionStatus::Loading => view! { <SessionLoading /> }.into_any(),
        SessionStatus::Guest => children().into_any(),
        SessionStatus::Authenticated => replace_redirect("/").into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_redirects_replace_history() {
        let options = replace_navigation();
        assert!(options.replace);
        assert!(options.resolve);
    }
}
