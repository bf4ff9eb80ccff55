use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_PUBLIC};
use crate::system::auth::context::use_session;

const FEATURES: [(&str, &str, &str); 6] = [
    (
        "car",
        "Kompleksowe zarządzanie",
        "Łatwe dodawanie, edytowanie i zarządzanie danymi pojazdów w jednym miejscu.",
    ),
    (
        "chart",
        "Zaawansowane statystyki",
        "Analizuj dane pojazdów za pomocą przejrzystych wykresów i raportów.",
    ),
    (
        "upload",
        "Import danych",
        "Importuj dane z plików CSV i eksportuj je do CSV lub JSON.",
    ),
    (
        "search",
        "Wydajne wyszukiwanie",
        "Filtruj, sortuj i przeszukuj bazę pojazdów w kilka sekund.",
    ),
    (
        "user",
        "Bezpieczeństwo danych",
        "Dostęp do danych wyłącznie po zalogowaniu na własne konto.",
    ),
    (
        "dashboard",
        "Dostęp z każdego urządzenia",
        "Widok tabeli na komputerze, karty na telefonie.",
    ),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();

    view! {
        <PageFrame page_id="sys_landing--public" category=PAGE_CAT_PUBLIC>
            <section class="hero">
                <h1 class="hero__title">"Zarządzaj danymi samochodów z łatwością"</h1>
                <p class="hero__lead">
                    "AutoData to kompleksowe narzędzie do zarządzania, analizowania i śledzenia danych pojazdów. Wszystko, czego potrzebujesz, w jednym miejscu."
                </p>
                <div class="hero__actions">
                    <Show
                        when=move || session.is_authenticated()
                        fallback=|| view! {
                            <a href="/register" class="btn-primary">"Rozpocznij za darmo"</a>
                            <a href="/login" class="btn-secondary">"Zaloguj się"</a>
                        }
                    >
                        <a href="/dashboard" class="btn-primary">"Przejdź do panelu"</a>
                    </Show>
                </div>
            </section>

            <section class="features">
                {FEATURES
                    .iter()
                    .map(|(icon_name, title, description)| {
                        view! {
                            <div class="feature-card">
                                <div class="feature-card__icon">{icon(icon_name)}</div>
                                <h3>{*title}</h3>
                                <p>{*description}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
        </PageFrame>
    }
}
