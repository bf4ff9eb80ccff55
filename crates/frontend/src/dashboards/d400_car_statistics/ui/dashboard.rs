use crate::dashboards::d400_car_statistics::api;
use crate::shared::components::charts::{ChartKind, SeriesChart};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::format::{format_mileage, format_price, group_thousands};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use contracts::dashboards::d400_car_statistics::{
    CarStatistics, FUEL_CHART_TITLE, MARK_CHART_TITLE, PRICE_TREND_CHART_TITLE,
    PROVINCE_CHART_TITLE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const LOAD_FAILED: &str = "Błąd podczas pobierania statystyk. Spróbuj ponownie później.";

pub(crate) fn total_text(stats: &CarStatistics) -> Option<String> {
    stats.total_cars.map(|n| group_thousands(n as f64))
}

pub(crate) fn avg_price_text(stats: &CarStatistics) -> Option<String> {
    stats.avg_price.map(|p| format_price(p.round()))
}

pub(crate) fn avg_mileage_text(stats: &CarStatistics) -> Option<String> {
    stats.avg_mileage.map(|m| format_mileage(m.round() as i64))
}

fn avg_year_text(stats: &CarStatistics) -> Option<String> {
    stats.avg_year.map(|y| format!("{:.0}", y))
}

/// `"od 5 000 zł do 120 000 zł"`; either bound may be missing
fn price_range_text(stats: &CarStatistics) -> Option<String> {
    match (stats.min_price, stats.max_price) {
        (Some(min), Some(max)) => Some(format!("od {} do {}", format_price(min), format_price(max))),
        (Some(min), None) => Some(format!("od {}", format_price(min))),
        (None, Some(max)) => Some(format!("do {}", format_price(max))),
        (None, None) => None,
    }
}

#[component]
pub fn CarStatisticsDashboard() -> impl IntoView {
    let (stats, set_stats) = signal(None::<CarStatistics>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_statistics().await {
                Ok(data) => {
                    let _ = set_stats.try_set(Some(data));
                }
                Err(e) => {
                    log::error!("Failed to load statistics: {}", e);
                    let _ = set_error.try_set(Some(LOAD_FAILED.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    load();

    let card = move |f: fn(&CarStatistics) -> Option<String>| {
        Signal::derive(move || stats.with(|s| s.as_ref().and_then(f)))
    };

    view! {
        <PageFrame page_id="d400_car_statistics--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Statystyki"
                subtitle="Przegląd danych o samochodach w bazie"
                breadcrumbs=vec![("Panel", Some("/dashboard")), ("Statystyki", None)]
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || loading.get())
                    on_click=move |_| load()
                >
                    {icon("refresh")}
                    " Odśwież"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}

                <Show
                    when=move || !(loading.get() && stats.with(Option::is_none))
                    fallback=|| view! { <Spinner label="Ładowanie statystyk..." /> }
                >
                    <div class="stat-grid">
                        <StatCard label="Liczba samochodów" icon_name="car" value=card(total_text) />
                        <StatCard label="Średnia cena" icon_name="chart" value=card(avg_price_text) />
                        <StatCard label="Średni przebieg" icon_name="dashboard" value=card(avg_mileage_text) />
                        <StatCard label="Średni rok produkcji" icon_name="chart" value=card(avg_year_text) />
                        <StatCard label="Zakres cen" icon_name="filter" value=card(price_range_text) />
                    </div>

                    {move || {
                        let data = stats.get().unwrap_or_default();
                        view! {
                            <div class="chart-grid">
                                <SeriesChart title=FUEL_CHART_TITLE series=data.fuel_series() kind=ChartKind::Bar />
                                <SeriesChart title=MARK_CHART_TITLE series=data.mark_series() kind=ChartKind::Bar />
                                <SeriesChart title=PROVINCE_CHART_TITLE series=data.province_series() kind=ChartKind::Bar />
                                <SeriesChart title=PRICE_TREND_CHART_TITLE series=data.price_trend_series() kind=ChartKind::Line />
                            </div>
                        }
                    }}
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_have_no_text() {
        let stats = CarStatistics::default();
        assert_eq!(total_text(&stats), None);
        assert_eq!(avg_price_text(&stats), None);
        assert_eq!(price_range_text(&stats), None);
    }

    #[test]
    fn card_texts_are_formatted() {
        let stats = CarStatistics {
            total_cars: Some(1250),
            avg_price: Some(45000.4),
            avg_mileage: Some(98765.6),
            avg_year: Some(2014.6),
            min_price: Some(5000.0),
            max_price: Some(120000.0),
            ..Default::default()
        };
        assert_eq!(total_text(&stats).as_deref(), Some("1 250"));
        assert_eq!(avg_price_text(&stats).as_deref(), Some("45 000 zł"));
        assert_eq!(avg_mileage_text(&stats).as_deref(), Some("98 766 km"));
        assert_eq!(avg_year_text(&stats).as_deref(), Some("2015"));
        assert_eq!(price_range_text(&stats).as_deref(), Some("od 5 000 zł do 120 000 zł"));
    }
}
