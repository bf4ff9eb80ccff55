use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::page_frame::{PageFrame, PAGE_CAT_PUBLIC};

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <PageFrame page_id="sys_not_found--public" category=PAGE_CAT_PUBLIC class="page--centered">
            <div class="not-found">
                <div class="not-found__code">"404"</div>
                <h1>"Strona nie została znaleziona"</h1>
                <p>
                    "Przepraszamy, ale podana strona nie istnieje lub została przeniesiona. Sprawdź adres lub wróć na stronę główną."
                </p>
                <A href="/" attr:class="btn-primary">"Wróć na stronę główną"</A>
            </div>
        </PageFrame>
    }
}
