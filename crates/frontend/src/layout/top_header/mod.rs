//! TopHeader component - application top navigation bar.
//!
//! Contains:
//! - Application title
//! - Navigation links (collapsible on narrow screens)
//! - User info and logout

use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use crate::system::auth::guard::replace_navigation;

const NAV_LINKS: [(&str, &str, &str); 5] = [
    ("/dashboard", "Panel", "dashboard"),
    ("/cars", "Samochody", "car"),
    ("/add-car", "Dodaj samochód", "plus"),
    ("/upload", "Import CSV", "upload"),
    ("/statistics", "Statystyki", "chart"),
];

#[component]
pub fn TopHeader() -> impl IntoView {
    let session = use_session();
    let navigate = StoredValue::new_local(use_navigate());
    let menu_open = RwSignal::new(false);

    let logout = move |_| {
        session.logout();
        menu_open.set(false);
        navigate.with_value(|nav| {
            nav("/", replace_navigation())
        });
    };

    let user_name = move || session.user().map(|u| u.display_name()).unwrap_or_default();
    let user_initials = move || session.user().map(|u| u.initials()).unwrap_or_default();

    view! {
        <header data-zone="header" class="top-header">
            <div class="top-header__brand">
                <A href="/dashboard" attr:class="top-header__title">
                    {icon("car")}
                    " Baza Samochodów"
                </A>
                <button
                    class="top-header__icon-btn top-header__menu-toggle"
                    aria-label="Menu"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { icon("x") } else { icon("chevron-down") }}
                </button>
            </div>

            <nav class="top-header__nav" class:top-header__nav--open=move || menu_open.get()>
                {NAV_LINKS.iter().map(|&(href, label, icon_name)| view! {
                    <A href=href attr:class="top-header__link" on:click=move |_| menu_open.set(false)>
                        {icon(icon_name)}
                        <span>{label}</span>
                    </A>
                }).collect_view()}
            </nav>

            <div class="top-header__actions">
                <A href="/account" attr:class="top-header__user" attr:title="Moje konto">
                    <span class="top-header__avatar">{user_initials}</span>
                    <span class="top-header__user-name">{user_name}</span>
                </A>
                <button class="top-header__icon-btn" title="Wyloguj" on:click=logout>
                    {icon("logout")}
                </button>
            </div>
        </header>
    }
}
