use crate::dashboards::{CarStatisticsDashboard, OverviewDashboard};
use crate::domain::a001_car::ui::details::CarDetails;
use crate::domain::a001_car::ui::list::CarList;
use crate::layout::Shell;
use crate::system::auth::guard::{replace_redirect, RequireAuth, RequireGuest};
use crate::system::pages::landing::LandingPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::pages::register::RegisterPage;
use crate::system::users::ui::account::AccountPage;
use crate::usecases::u501_import_csv::ImportCsvWidget;
use contracts::domain::a001_car::CarId;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_params_map;
use leptos_router::path;

/// Signed-in page: session guard plus the application shell
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    view! {
        <RequireAuth>
            {
                let children = children.clone();
                view! { <Shell>{children()}</Shell> }
            }
        </RequireAuth>
    }
}

fn parse_car_id(raw: Option<String>) -> Option<CarId> {
    raw.and_then(|id| id.trim().parse::<CarId>().ok())
        .filter(|id| *id > 0)
}

#[component]
fn EditCarRoute() -> impl IntoView {
    let params = use_params_map();

    move || match parse_car_id(params.with(|p| p.get("id"))) {
        Some(id) => view! { <CarDetails car_id=Some(id) /> }.into_any(),
        None => {
            log::warn!("Invalid car id in route");
            replace_redirect("/cars").into_any()
        }
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/") view=LandingPage />
                <Route
                    path=path!("/login")
                    view=|| view! { <RequireGuest><LoginPage /></RequireGuest> }
                />
                <Route
                    path=path!("/register")
                    view=|| view! { <RequireGuest><RegisterPage /></RequireGuest> }
                />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <Protected><OverviewDashboard /></Protected> }
                />
                <Route
                    path=path!("/cars")
                    view=|| view! { <Protected><CarList /></Protected> }
                />
                <Route
                    path=path!("/add-car")
                    view=|| view! { <Protected><CarDetails car_id=None /></Protected> }
                />
                <Route
                    path=path!("/edit-car/:id")
                    view=|| view! { <Protected><EditCarRoute /></Protected> }
                />
                <Route
                    path=path!("/upload")
                    view=|| view! { <Protected><ImportCsvWidget /></Protected> }
                />
                <Route
                    path=path!("/statistics")
                    view=|| view! { <Protected><CarStatisticsDashboard /></Protected> }
                />
                <Route
                    path=path!("/account")
                    view=|| view! { <Protected><AccountPage /></Protected> }
                />
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_id_from_route_param() {
        assert_eq!(parse_car_id(Some("42".into())), Some(42));
        assert_eq!(parse_car_id(Some("abc".into())), None);
        assert_eq!(parse_car_id(Some("0".into())), None);
        assert_eq!(parse_car_id(None), None);
    }
}
