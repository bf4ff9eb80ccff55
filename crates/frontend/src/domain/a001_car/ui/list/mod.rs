pub mod state;

use self::state::{create_state, CarListState};
use crate::domain::a001_car::api;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::export::{download_bytes, export_file_name, ExportFormat};
use crate::shared::format::{format_brand, format_fuel, format_mileage, format_price, format_vol_engine};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_car::{CarDto, FilterField, Province, SortOption};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

/// Below this viewport width records are shown as cards
const CARDS_BREAKPOINT_PX: f64 = 900.0;

const FETCH_FAILED: &str = "Nie udało się pobrać danych o samochodach";
const DELETE_FAILED: &str = "Nie udało się usunąć samochodu";

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::MAX)
}

/// Fetches the page described by the current query.
///
/// Every call takes a new ticket; a response whose ticket is no longer the
/// newest is dropped.
fn load_cars(state: RwSignal<CarListState>) {
    let Some((ticket, request)) = state.try_update(|s| {
        s.is_loading = true;
        s.error = None;
        (s.query.begin_fetch(), s.query.request())
    }) else {
        return;
    };

    spawn_local(async move {
        let result = api::fetch_page(&request).await;
        let _ = state.try_update(|s| {
            if !s.query.is_current(ticket) {
                log::debug!("Dropping stale car list response #{}", ticket);
                return;
            }
            s.is_loading = false;
            match result {
                Ok(page) => {
                    s.page = page;
                    s.is_loaded = true;
                }
                Err(e) => {
                    log::error!("Failed to fetch cars: {}", e);
                    s.error = Some(FETCH_FAILED.to_string());
                }
            }
        });
    });
}

fn load_distinct(state: RwSignal<CarListState>) {
    spawn_local(async move {
        match api::fetch_distinct().await {
            Ok(values) => {
                let _ = state.try_update(|s| s.distinct = values);
            }
            Err(e) => log::warn!("Failed to fetch filter values: {}", e),
        }
    });
}

#[component]
fn FilterText(
    state: RwSignal<CarListState>,
    field: FilterField,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{field.label()}</label>
            <input
                type=input_type
                prop:value=move || state.with(|s| s.query.draft.get(field).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.query.set_draft(field, value));
                }
            />
        </div>
    }
}

/// Select over `(value, label)` options with an "all" entry.
#[component]
fn FilterSelect(
    state: RwSignal<CarListState>,
    field: FilterField,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{field.label()}</label>
            <select
                prop:value=move || state.with(|s| s.query.draft.get(field).to_string())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.query.set_draft(field, value));
                }
            >
                <option value="">"Wszystkie"</option>
                {move || options.get().into_iter().map(|(value, label)| {
                    let selected_value = value.clone();
                    view! {
                        <option
                            value=value
                            selected=move || state.with(|s| s.query.draft.get(field) == selected_value)
                        >
                            {label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[component]
fn CarCard(car: CarDto, on_edit: Callback<i64>, on_delete: Callback<CarDto>) -> impl IntoView {
    let id = car.id;
    let title = format!("{} {}", format_brand(&car.mark), car.model);
    let to_delete = car.clone();

    view! {
        <div class="car-card">
            <div class="car-card__header">
                <div>
                    <div class="car-card__title">{title}</div>
                    {car.generation_name.clone().filter(|g| !g.is_empty()).map(|g| view! {
                        <div class="car-card__subtitle">{g}</div>
                    })}
                </div>
                <div class="car-card__price">{format_price(car.price)}</div>
            </div>
            <div class="car-card__chips">
                <span class="chip">{car.year.to_string()}</span>
                <span class="chip">{format_mileage(car.mileage)}</span>
                <span class="chip">{format_vol_engine(car.vol_engine)}</span>
                <span class="chip chip--primary">{format_fuel(&car.fuel)}</span>
            </div>
            <div class="car-card__location">{format!("{}, {}", car.city, car.province)}</div>
            <div class="car-card__actions">
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| {
                        if let Some(id) = id {
                            on_edit.run(id);
                        }
                    }
                >
                    {icon("edit")}
                    " Edytuj"
                </Button>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_delete.run(to_delete.clone())
                >
                    {icon("delete")}
                    " Usuń"
                </Button>
            </div>
        </div>
    }
}

#[component]
pub fn CarList() -> impl IntoView {
    let state = create_state();
    let navigate = StoredValue::new_local(use_navigate());
    let filters_expanded = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let (show_cards, set_show_cards) = signal(viewport_width() < CARDS_BREAKPOINT_PX);

    let resize = window_event_listener(ev::resize, move |_| {
        set_show_cards.set(viewport_width() < CARDS_BREAKPOINT_PX);
    });
    on_cleanup(move || resize.remove());

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_cars(state);
            load_distinct(state);
        }
    });

    let items = Memo::new(move |_| state.with(|s| s.page.items.clone()));
    let total = Memo::new(move |_| state.with(|s| s.page.total));
    let is_loading = Memo::new(move |_| state.with(|s| s.is_loading));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));
    let applied = Memo::new(move |_| state.with(|s| s.query.applied().clone()));
    let mark_options = Memo::new(move |_| {
        state.with(|s| {
            s.distinct
                .marks
                .iter()
                .map(|m| (m.clone(), format_brand(m)))
                .collect::<Vec<_>>()
        })
    });
    let fuel_options = Memo::new(move |_| {
        state.with(|s| {
            s.distinct
                .fuels
                .iter()
                .map(|f| (f.clone(), format_fuel(f)))
                .collect::<Vec<_>>()
        })
    });
    let province_options: Vec<(String, String)> = Province::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.as_str().to_string()))
        .collect();

    let apply_filters = move || {
        state.update(|s| s.query.commit());
        load_cars(state);
    };

    let reset_filters = move || {
        state.update(|s| s.query.reset());
        load_cars(state);
    };

    let clear_search = move || {
        state.update(|s| s.query.clear_search());
        load_cars(state);
    };

    let remove_filter = move |field: FilterField| {
        state.update(|s| s.query.remove_applied(field));
        load_cars(state);
    };

    let on_sort_change = move |ev: ev::Event| {
        let sort = SortOption::from_key(&event_target_value(&ev));
        state.update(|s| s.query.set_sort(sort));
        load_cars(state);
    };

    let go_to_page = Callback::new(move |page: usize| {
        if state.try_update(|s| s.query.set_page(page, s.page.total)) == Some(true) {
            load_cars(state);
        }
    });

    let change_page_size = Callback::new(move |size: usize| {
        if state.try_update(|s| s.query.set_page_size(size, s.page.total)) == Some(true) {
            load_cars(state);
        }
    });

    let edit_car = Callback::new(move |id: i64| {
        navigate.with_value(|nav| nav(&format!("/edit-car/{}", id), Default::default()));
    });

    let ask_delete = Callback::new(move |car: CarDto| {
        state.update(|s| s.pending_delete = Some(car));
        delete_open.set(true);
    });

    let close_delete = move || {
        delete_open.set(false);
        state.update(|s| s.pending_delete = None);
    };

    let confirm_delete = move || {
        let Some(id) = state.with_untracked(|s| s.pending_delete.as_ref().and_then(|c| c.id)) else {
            close_delete();
            return;
        };
        spawn_local(async move {
            match api::delete(id).await {
                Ok(()) => {
                    let _ = state.try_update(|s| {
                        s.page.remove_first(|c| c.id == Some(id));
                    });
                }
                Err(e) => {
                    log::error!("Failed to delete car {}: {}", id, e);
                    let _ = state.try_update(|s| s.error = Some(DELETE_FAILED.to_string()));
                }
            }
            let _ = delete_open.try_set(false);
            let _ = state.try_update(|s| s.pending_delete = None);
        });
    };

    let export = move |format: ExportFormat| {
        let request = state.with_untracked(|s| s.query.request());
        spawn_local(async move {
            let result = api::export(format, &request).await.and_then(|bytes| {
                let name = export_file_name(format, chrono::Local::now().date_naive());
                download_bytes(&bytes, &name, format.mime_type())
                    .map_err(contracts::shared::api_error::ApiError::Parse)
            });
            if let Err(e) = result {
                log::error!("Export failed: {}", e);
                let _ = state.try_update(|s| s.error = Some(format.error_message().to_string()));
            }
        });
    };

    let rows_view = move || {
        let cars = items.get();
        if cars.is_empty() {
            return view! {
                <div class="empty-state">
                    <div class="empty-state__title">"Nie znaleziono samochodów"</div>
                    <div class="empty-state__hint">"Spróbuj zmienić kryteria wyszukiwania"</div>
                </div>
            }
            .into_any();
        }

        if show_cards.get() {
            return view! {
                <div class="car-cards">
                    {cars.into_iter().map(|car| view! {
                        <CarCard car=car on_edit=edit_car on_delete=ask_delete />
                    }).collect_view()}
                </div>
            }
            .into_any();
        }

        view! {
            <div class="table-container">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Marka i model"</th>
                            <th>"Rok"</th>
                            <th>"Przebieg"</th>
                            <th>"Silnik"</th>
                            <th>"Paliwo"</th>
                            <th>"Lokalizacja"</th>
                            <th class="text-right">"Cena"</th>
                            <th class="text-center">"Akcje"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {cars.into_iter().map(|car| {
                            let id = car.id;
                            let to_delete = car.clone();
                            view! {
                                <tr>
                                    <td>
                                        <div class="cell-title">{format!("{} {}", format_brand(&car.mark), car.model)}</div>
                                        {car.generation_name.clone().filter(|g| !g.is_empty()).map(|g| view! {
                                            <div class="cell-subtitle">{g}</div>
                                        })}
                                    </td>
                                    <td>{car.year.to_string()}</td>
                                    <td>{format_mileage(car.mileage)}</td>
                                    <td>{format_vol_engine(car.vol_engine)}</td>
                                    <td><span class="chip chip--primary">{format_fuel(&car.fuel)}</span></td>
                                    <td>{format!("{}, {}", car.city, car.province)}</td>
                                    <td class="text-right cell-price">{format_price(car.price)}</td>
                                    <td class="text-center">
                                        <button
                                            class="btn-icon"
                                            title="Edytuj"
                                            on:click=move |_| {
                                                if let Some(id) = id {
                                                    edit_car.run(id);
                                                }
                                            }
                                        >
                                            {icon("edit")}
                                        </button>
                                        <button
                                            class="btn-icon btn-icon--danger"
                                            title="Usuń"
                                            on:click=move |_| ask_delete.run(to_delete.clone())
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="a001_car--list" category=PAGE_CAT_LIST>
            <PageHeader
                title="Lista samochodów"
                breadcrumbs=vec![("Panel", Some("/dashboard")), ("Samochody", None)]
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| export(ExportFormat::Csv)>
                    {icon("download")}
                    " CSV"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| export(ExportFormat::Json)>
                    {icon("download")}
                    " JSON"
                </Button>
                <A href="/add-car" attr:class="btn-primary">
                    {icon("plus")}
                    " Dodaj samochód"
                </A>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}

                <div class="search-bar">
                    <div class="search-bar__input">
                        {icon("search")}
                        <input
                            type="search"
                            placeholder="Szukaj po marce, modelu, mieście..."
                            prop:value=move || state.with(|s| s.query.search_input.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.query.search_input = value);
                            }
                            on:keydown=move |ev: ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    apply_filters();
                                }
                            }
                        />
                        <Show when=move || state.with(|s| !s.query.search_input.is_empty() || !s.query.search_term().is_empty())>
                            <button class="btn-icon" title="Wyczyść" on:click=move |_| clear_search()>
                                {icon("x")}
                            </button>
                        </Show>
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_filters()>
                        "Szukaj"
                    </Button>
                    <label class="sort-select">
                        "Sortuj: "
                        <select
                            on:change=on_sort_change
                            prop:value=move || state.with(|s| s.query.sort().key().to_string())
                        >
                            {SortOption::ALL.iter().map(|sort| view! {
                                <option value=sort.key()>{sort.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                </div>

                <FilterPanel
                    is_expanded=filters_expanded
                    active_filters_count=Signal::derive(move || applied.with(|f| f.active_count()))
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.query.page()))
                            total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                            total_count=Signal::derive(move || total.get())
                            page_size=Signal::derive(move || state.with(|s| s.query.page_size()))
                            on_page_change=go_to_page
                            on_page_size_change=change_page_size
                        />
                    }
                    filter_content=move || {
                        let province_options = province_options.clone();
                        view! {
                            <FilterSelect state=state field=FilterField::Mark options=mark_options />
                            <FilterText state=state field=FilterField::Model />
                            <FilterText state=state field=FilterField::YearMin input_type="number" />
                            <FilterText state=state field=FilterField::YearMax input_type="number" />
                            <FilterSelect state=state field=FilterField::Fuel options=fuel_options />
                            <FilterSelect state=state field=FilterField::Province options=Signal::derive(move || province_options.clone()) />
                            <FilterText state=state field=FilterField::PriceMin input_type="number" />
                            <FilterText state=state field=FilterField::PriceMax input_type="number" />
                        }
                    }
                    actions=move || view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| reset_filters()>
                            "Resetuj filtry"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_filters()>
                            "Zastosuj filtry"
                        </Button>
                    }
                    on_clear_all=Callback::new(move |_| reset_filters())
                    filter_tags=move || view! {
                        {move || applied.get().active().map(|(field, value)| {
                            let label = format!("{}: {}", field.label(), value);
                            view! {
                                <FilterTag label=label on_remove=Callback::new(move |_| remove_filter(field)) />
                            }
                        }).collect_view()}
                    }
                />

                <div class="results">
                    <div class="results__header">
                        <h2>{move || format!("Znalezione samochody ({})", total.get())}</h2>
                        <Show when=move || is_loading.get()>
                            <Spinner size=SpinnerSize::Small />
                        </Show>
                    </div>
                    {rows_view}
                </div>
            </div>

            <Dialog open=delete_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Potwierdzenie usunięcia"</DialogTitle>
                        <DialogContent>
                            {move || state.with(|s| s.pending_delete.clone()).map(|car| view! {
                                <p>
                                    {format!(
                                        "Czy na pewno chcesz usunąć samochód {} {} ({})?",
                                        format_brand(&car.mark),
                                        car.model,
                                        car.year,
                                    )}
                                </p>
                                <p>"Ta operacja jest nieodwracalna."</p>
                            })}
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| close_delete()>
                                "Anuluj"
                            </Button>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| confirm_delete()>
                                "Usuń"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </PageFrame>
    }
}
