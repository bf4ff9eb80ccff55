use super::view_model::CarDetailsViewModel;
use crate::shared::components::page_header::PageHeader;
use crate::shared::format::{format_brand, format_mileage, format_price, format_vol_engine};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_car::form::{parse_mileage, parse_price, parse_vol_engine};
use contracts::domain::a001_car::{CarField, CarForm, CarFormStep, CarId, Fuel, Province};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::*;

#[derive(Clone, Copy, PartialEq)]
enum InputKind {
    Text,
    Number { step: &'static str },
}

#[component]
fn CarInput(vm: CarDetailsViewModel, field: CarField, #[prop(optional)] number_step: Option<&'static str>) -> impl IntoView {
    let kind = match number_step {
        Some(step) => InputKind::Number { step },
        None => InputKind::Text,
    };
    let error = move || vm.editor.with(|e| e.errors.get(field).map(str::to_string));

    view! {
        <div class="form-group" class:form-group--error=move || error().is_some()>
            <label>{field.label()}</label>
            <input
                type=if kind == InputKind::Text { "text" } else { "number" }
                step=match kind {
                    InputKind::Number { step } => Some(step),
                    InputKind::Text => None,
                }
                prop:value=move || vm.editor.with(|e| e.form.get(field).to_string())
                on:input=move |ev| vm.set_field(field, event_target_value(&ev))
            />
            {move || error().map(|msg| view! { <span class="form-group__error">{msg}</span> })}
        </div>
    }
}

#[component]
fn CarSelect(vm: CarDetailsViewModel, field: CarField, options: Vec<(&'static str, &'static str)>) -> impl IntoView {
    let error = move || vm.editor.with(|e| e.errors.get(field).map(str::to_string));
    let values: Vec<&'static str> = options.iter().map(|(value, _)| *value).collect();
    // Stored value outside the list (imported rows) stays selectable as is
    let stored_option = move || {
        let current = vm.editor.with(|e| e.form.get(field).to_string());
        (!current.is_empty() && !values.contains(&current.as_str())).then(|| {
            view! { <option value=current.clone() selected=true>{current.clone()}</option> }
        })
    };

    view! {
        <div class="form-group" class:form-group--error=move || error().is_some()>
            <label>{field.label()}</label>
            <select
                prop:value=move || vm.editor.with(|e| e.form.get(field).to_string())
                on:change=move |ev| vm.set_field(field, event_target_value(&ev))
            >
                <option value="">"Wybierz..."</option>
                {stored_option}
                {options.into_iter().map(|(value, label)| view! {
                    <option
                        value=value
                        selected=move || vm.editor.with(|e| e.form.get(field) == value)
                    >
                        {label}
                    </option>
                }).collect_view()}
            </select>
            {move || error().map(|msg| view! { <span class="form-group__error">{msg}</span> })}
        </div>
    }
}

/// Formatted read-only rows for the last step
fn summary_rows(form: &CarForm) -> Vec<(&'static str, String)> {
    let or_raw = |formatted: Option<String>, raw: &str| formatted.unwrap_or_else(|| raw.to_string());
    let dash = |value: &str| {
        if value.trim().is_empty() {
            "—".to_string()
        } else {
            value.trim().to_string()
        }
    };
    vec![
        (CarField::Mark.label(), format_brand(&form.mark)),
        (CarField::Model.label(), dash(&form.model)),
        (CarField::GenerationName.label(), dash(&form.generation_name)),
        (CarField::Year.label(), dash(&form.year)),
        (
            CarField::Mileage.label(),
            or_raw(parse_mileage(&form.mileage).map(format_mileage), &form.mileage),
        ),
        (
            CarField::VolEngine.label(),
            or_raw(parse_vol_engine(&form.vol_engine).map(format_vol_engine), &form.vol_engine),
        ),
        (
            CarField::Fuel.label(),
            if form.fuel.trim().is_empty() { dash(&form.fuel) } else { Fuel::display_label(&form.fuel) },
        ),
        (CarField::City.label(), dash(&form.city)),
        (CarField::Province.label(), dash(&form.province)),
        (
            CarField::Price.label(),
            or_raw(parse_price(&form.price).map(format_price), &form.price),
        ),
    ]
}

#[component]
pub fn CarDetails(car_id: Option<CarId>) -> impl IntoView {
    let vm = CarDetailsViewModel::new(car_id);
    let navigate = StoredValue::new_local(use_navigate());

    let back_to_list = Callback::new(move |replace: bool| {
        navigate.with_value(|nav| {
            nav(
                "/cars",
                NavigateOptions {
                    replace,
                    ..Default::default()
                },
            )
        });
    });

    vm.load(Callback::new(move |_| back_to_list.run(true)));

    let step = Memo::new(move |_| vm.editor.with(|e| e.step()));
    let is_last = Memo::new(move |_| vm.editor.with(|e| e.is_last_step()));

    let title = move || {
        if vm.is_edit_mode() {
            let name = vm.editor.with(|e| format!("{} {}", format_brand(&e.form.mark), e.form.model));
            format!("Edytuj samochód: {}", name.trim())
        } else {
            "Dodaj samochód".to_string()
        }
    };

    let fuel_options: Vec<(&'static str, &'static str)> =
        Fuel::ALL.iter().map(|f| (f.as_str(), f.label())).collect();
    let province_options: Vec<(&'static str, &'static str)> =
        Province::ALL.iter().map(|p| (p.as_str(), p.as_str())).collect();

    let step_content = move || match step.get() {
        CarFormStep::Vehicle => view! {
            <div class="form-grid">
                <CarInput vm=vm field=CarField::Mark />
                <CarInput vm=vm field=CarField::Model />
                <CarInput vm=vm field=CarField::GenerationName />
                <CarInput vm=vm field=CarField::Year number_step="1" />
                <CarInput vm=vm field=CarField::Mileage number_step="1" />
                <CarInput vm=vm field=CarField::VolEngine number_step="0.1" />
                <CarSelect vm=vm field=CarField::Fuel options=fuel_options.clone() />
            </div>
        }
        .into_any(),
        CarFormStep::Location => view! {
            <div class="form-grid">
                <CarInput vm=vm field=CarField::City />
                <CarSelect vm=vm field=CarField::Province options=province_options.clone() />
            </div>
        }
        .into_any(),
        CarFormStep::PriceSummary => view! {
            <div class="form-grid">
                <CarInput vm=vm field=CarField::Price number_step="100" />
            </div>
            <div class="summary-section">
                <h3>"Podsumowanie"</h3>
                <dl class="detail-list">
                    {move || vm.editor.with(|e| summary_rows(&e.form)).into_iter().map(|(label, value)| view! {
                        <dt>{label}</dt>
                        <dd>{value}</dd>
                    }).collect_view()}
                </dl>
            </div>
        }
        .into_any(),
    };
    let step_content = StoredValue::new(step_content);

    view! {
        <PageFrame page_id="a001_car--detail" category=PAGE_CAT_DETAIL>
            <PageHeader
                title=Signal::derive(title)
                breadcrumbs=vec![("Panel", Some("/dashboard")), ("Samochody", Some("/cars")), ("Formularz", None)]
            />

            <div class="page__content">
                <Show
                    when=move || !vm.is_loading.get()
                    fallback=|| view! { <Spinner label="Ładowanie..." /> }
                >
                    <Card>
                        {move || vm.submit_error.get().map(|msg| view! {
                            <div class="error-message">{msg}</div>
                        })}
                        <Show when=move || vm.submit_success.get()>
                            <div class="success-message">{vm.success_message()}</div>
                        </Show>

                        <ol class="stepper">
                            {CarFormStep::ALL.iter().map(|&s| view! {
                                <li
                                    class="stepper__step"
                                    class:stepper__step--active=move || step.get() == s
                                    class:stepper__step--done=move || vm.editor.with(|e| e.is_step_completed(s))
                                    class:stepper__step--locked=move || vm.editor.with(|e| !e.can_jump_to(s))
                                    on:click=move |_| vm.jump_to(s)
                                >
                                    <span class="stepper__index">{s.index() + 1}</span>
                                    <span class="stepper__label">{s.label()}</span>
                                </li>
                            }).collect_view()}
                        </ol>

                        <div class="stepper__content">{move || step_content.with_value(|f| f())}</div>

                        <div class="stepper__actions">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| {
                                    if step.get_untracked() == CarFormStep::Vehicle {
                                        back_to_list.run(false);
                                    } else {
                                        vm.back();
                                    }
                                }
                            >
                                {move || if step.get() == CarFormStep::Vehicle { "Anuluj" } else { "Wstecz" }}
                            </Button>
                            <Show
                                when=move || is_last.get()
                                fallback=move || view! {
                                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.next()>
                                        "Dalej"
                                    </Button>
                                }
                            >
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    disabled=Signal::derive(move || vm.is_submitting.get() || vm.submit_success.get())
                                    on_click=move |_| vm.submit(Callback::new(move |_| back_to_list.run(false)))
                                >
                                    {move || if vm.is_edit_mode() { "Zapisz zmiany" } else { "Dodaj samochód" }}
                                </Button>
                            </Show>
                        </div>
                    </Card>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_formats_known_values() {
        let form = CarForm {
            mark: "toyota".into(),
            model: "Corolla".into(),
            year: "2015".into(),
            mileage: "120000".into(),
            vol_engine: "1.6".into(),
            fuel: "gasoline".into(),
            city: "Kraków".into(),
            province: "Małopolskie".into(),
            price: "32900".into(),
            ..Default::default()
        };
        let rows = summary_rows(&form);
        let value = |label: &str| rows.iter().find(|(l, _)| *l == label).map(|(_, v)| v.clone());
        assert_eq!(value("Marka").as_deref(), Some("Toyota"));
        assert_eq!(value("Przebieg (km)").as_deref(), Some("120 000 km"));
        assert_eq!(value("Pojemność silnika (l)").as_deref(), Some("1 600 cm³"));
        assert_eq!(value("Rodzaj paliwa").as_deref(), Some("Benzyna"));
        assert_eq!(value("Nazwa generacji").as_deref(), Some("—"));
        assert_eq!(value("Cena (zł)").as_deref(), Some("32 900 zł"));
    }

    #[test]
    fn summary_keeps_unknown_fuel_text() {
        let form = CarForm {
            fuel: "Hydrogen".into(),
            ..Default::default()
        };
        let rows = summary_rows(&form);
        let fuel = rows.iter().find(|(l, _)| *l == "Rodzaj paliwa").map(|(_, v)| v.as_str());
        assert_eq!(fuel, Some("Hydrogen"));
    }
}
