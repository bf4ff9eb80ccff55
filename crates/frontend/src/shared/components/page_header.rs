use leptos::prelude::*;
use leptos_router::components::A;

/// PageHeader component - title, breadcrumbs and an action slot
#[component]
pub fn PageHeader(
    /// Page title (required)
    #[prop(into)]
    title: Signal<String>,

    /// Optional subtitle
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// `(label, href)` pairs; the last crumb is rendered without a link
    #[prop(optional)]
    breadcrumbs: Vec<(&'static str, Option<&'static str>)>,

    /// Action buttons on the right
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                {(!breadcrumbs.is_empty()).then(|| view! {
                    <nav class="breadcrumbs">
                        {breadcrumbs.into_iter().map(|(label, href)| match href {
                            Some(href) => view! {
                                <A href=href attr:class="breadcrumbs__link">{label}</A>
                                <span class="breadcrumbs__sep">"/"</span>
                            }.into_any(),
                            None => view! { <span class="breadcrumbs__current">{label}</span> }.into_any(),
                        }).collect_view()}
                    </nav>
                })}
                <h1 class="page__title">{move || title.get()}</h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page__subtitle">{s}</div>
                })}
            </div>
            <div class="page__header-right">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
