use crate::routes::routes::AppRoutes;
use crate::system::auth::context::SessionContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Session store for the whole app; starts in Loading until storage is read.
    let session = SessionContext::new();
    provide_context(session);

    Effect::new(move |_| {
        session.refresh_user();
    });

    view! {
        <AppRoutes />
    }
}
