use chrono::{Datelike, Local};
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = Local::now().year();

    view! {
        <footer data-zone="footer" class="footer">
            <span class="footer__text">{format!("© {} Baza Samochodów", year)}</span>
        </footer>
    }
}
