use crate::shared::icons::icon;
use leptos::prelude::*;

const NO_DATA: &str = "Brak danych";

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Formatted value; `None` renders the "no data" state
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let card_class = move || {
        if value.get().is_some() {
            "stat-card"
        } else {
            "stat-card stat-card--empty"
        }
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=card_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| NO_DATA.to_string())}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}
