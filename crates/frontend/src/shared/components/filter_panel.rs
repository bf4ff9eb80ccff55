use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter form.
///
/// The header row always shows the pagination slot; applied filters are
/// listed as removable chips under the form, with a "clear all" link when
/// `on_clear_all` is given.
#[component]
pub fn FilterPanel(
    #[prop(into)] is_expanded: RwSignal<bool>,
    /// Badge with the number of applied filters
    #[prop(into)]
    active_filters_count: Signal<usize>,
    #[prop(into)] pagination_controls: ViewFn,
    #[prop(into)] filter_content: ViewFn,
    /// Apply / reset buttons
    #[prop(into)]
    actions: ViewFn,
    #[prop(optional, into)] filter_tags: Option<ViewFn>,
    #[prop(optional)] on_clear_all: Option<Callback<()>>,
) -> impl IntoView {
    let has_filters = move || active_filters_count.get() > 0;

    view! {
        <section class="filter-panel" class:filter-panel--expanded=move || is_expanded.get()>
            <div class="filter-panel-header">
                <button
                    type="button"
                    class="filter-panel__toggle"
                    aria-expanded=move || is_expanded.get().to_string()
                    on:click=move |_| is_expanded.update(|open| *open = !*open)
                >
                    <span class="filter-panel__chevron">{icon("chevron-down")}</span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filtry"</span>
                    <Show when=has_filters>
                        <span class="badge badge--primary">{move || active_filters_count.get()}</span>
                    </Show>
                </button>
                <div class="filter-panel-header__center">{pagination_controls.run()}</div>
            </div>

            <Show when=move || is_expanded.get()>
                <div class="filter-panel-content">
                    <div class="filter-panel__grid">{filter_content.run()}</div>
                    <div class="filter-panel__actions">{actions.run()}</div>
                </div>
            </Show>

            {filter_tags.map(|tags| view! {
                <Show when=has_filters>
                    <div class="filter-panel__tags">
                        {tags.run()}
                        {on_clear_all.map(|clear| view! {
                            <button type="button" class="filter-panel__clear" on:click=move |_| clear.run(())>
                                "Wyczyść wszystkie"
                            </button>
                        })}
                    </div>
                </Show>
            })}
        </section>
    }
}

/// Chip for one applied filter
#[component]
pub fn FilterTag(#[prop(into)] label: String, on_remove: Callback<()>) -> impl IntoView {
    view! {
        <span class="filter-tag">
            {label}
            <button
                type="button"
                class="filter-tag__remove"
                title="Usuń filtr"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </button>
        </span>
    }
}
