use crate::dashboards::d400_car_statistics::api as statistics_api;
use crate::dashboards::d400_car_statistics::ui::{avg_mileage_text, avg_price_text, total_text};
use crate::domain::a001_car::api as car_api;
use crate::shared::components::charts::{ChartKind, SeriesChart};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::format::{format_brand, format_mileage, format_price};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use crate::system::auth::context::use_session;
use contracts::dashboards::d400_car_statistics::{CarStatistics, FUEL_CHART_TITLE};
use contracts::domain::a001_car::CarDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

const RECENT_LIMIT: usize = 5;
const LOAD_FAILED: &str = "Nie udało się załadować danych panelu.";

fn recent_cars(mut cars: Vec<CarDto>) -> Vec<CarDto> {
    cars.truncate(RECENT_LIMIT);
    cars
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let session = use_session();
    let (stats, set_stats) = signal(None::<CarStatistics>);
    let (recent, set_recent) = signal(Vec::<CarDto>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    spawn_local(async move {
        let (stats_result, recent_result) =
            futures::join!(statistics_api::fetch_statistics(), car_api::fetch_recent());

        let mut failed = false;
        match stats_result {
            Ok(data) => {
                let _ = set_stats.try_set(Some(data));
            }
            Err(e) => {
                log::error!("Failed to load statistics: {}", e);
                failed = true;
            }
        }
        match recent_result {
            Ok(cars) => {
                let _ = set_recent.try_set(recent_cars(cars));
            }
            Err(e) => {
                log::error!("Failed to load recent cars: {}", e);
                failed = true;
            }
        }
        if failed {
            let _ = set_error.try_set(Some(LOAD_FAILED.to_string()));
        }
        let _ = set_loading.try_set(false);
    });

    let greeting = move || {
        session
            .user()
            .map(|u| format!("Witaj, {}!", u.display_name()))
            .unwrap_or_else(|| "Witaj!".to_string())
    };

    let card = move |f: fn(&CarStatistics) -> Option<String>| {
        Signal::derive(move || stats.with(|s| s.as_ref().and_then(f)))
    };

    view! {
        <PageFrame page_id="d401_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title=Signal::derive(greeting) subtitle="Podsumowanie bazy samochodów">
                <A href="/add-car" attr:class="btn-primary">
                    {icon("plus")}
                    " Dodaj samochód"
                </A>
                <A href="/upload" attr:class="btn-secondary">
                    {icon("upload")}
                    " Import CSV"
                </A>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}

                <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Ładowanie..." /> }>
                    <div class="stat-grid">
                        <StatCard label="Liczba samochodów" icon_name="car" value=card(total_text) />
                        <StatCard label="Średnia cena" icon_name="chart" value=card(avg_price_text) />
                        <StatCard label="Średni przebieg" icon_name="dashboard" value=card(avg_mileage_text) />
                    </div>

                    <div class="dashboard-grid">
                        <Card>
                            <h3>"Ostatnio dodane"</h3>
                            {move || {
                                let cars = recent.get();
                                if cars.is_empty() {
                                    view! { <p class="empty-state">"Brak danych"</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="recent-list">
                                            {cars.into_iter().map(|car| {
                                                let href = car.id.map(|id| format!("/edit-car/{}", id)).unwrap_or_else(|| "/cars".to_string());
                                                view! {
                                                    <li class="recent-list__item">
                                                        <A href=href attr:class="recent-list__link">
                                                            <span class="recent-list__name">
                                                                {format!("{} {}", format_brand(&car.mark), car.model)}
                                                            </span>
                                                            <span class="recent-list__meta">
                                                                {format!("{} · {}", car.year, format_mileage(car.mileage))}
                                                            </span>
                                                            <span class="recent-list__price">{format_price(car.price)}</span>
                                                        </A>
                                                    </li>
                                                }
                                            }).collect_view()}
                                        </ul>
                                    }.into_any()
                                }
                            }}
                            <A href="/cars" attr:class="card__link">"Zobacz wszystkie"</A>
                        </Card>

                        {move || view! {
                            <SeriesChart
                                title=FUEL_CHART_TITLE
                                series=stats.with(|s| s.as_ref().and_then(CarStatistics::fuel_series))
                                kind=ChartKind::Bar
                            />
                        }}
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_list_is_capped() {
        let cars: Vec<CarDto> = (0..8)
            .map(|i| CarDto {
                id: Some(i),
                mark: "skoda".into(),
                model: "octavia".into(),
                generation_name: None,
                year: 2018,
                mileage: 90_000,
                vol_engine: 1.6,
                fuel: "diesel".into(),
                city: "Poznań".into(),
                province: "Wielkopolskie".into(),
                price: 45_000.0,
            })
            .collect();
        let ids: Vec<_> = recent_cars(cars).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert!(recent_cars(Vec::new()).is_empty());
    }
}
