//! PageFrame: standard root wrapper for every routed page.
//!
//! Sets two metadata attributes on the root DOM element:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a001_car--list"`
//!   - `data-page-category`: one of the `PAGE_CAT_*` constants
//!
//! ```ignore
//! view! {
//!     <PageFrame page_id="a001_car--list" category=PAGE_CAT_LIST>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use leptos::prelude::*;

/// Table of records with filters and pagination
pub const PAGE_CAT_LIST: &str = "list";
/// Create/edit form for a single record
pub const PAGE_CAT_DETAIL: &str = "detail";
/// Charts and summary cards
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
/// Action page (imports)
pub const PAGE_CAT_USECASE: &str = "usecase";
/// Account and auth pages
pub const PAGE_CAT_SYSTEM: &str = "system";
/// Landing and error pages, free-form layout
pub const PAGE_CAT_PUBLIC: &str = "public";

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    /// Additional CSS classes appended after the base class.
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_SYSTEM => "page page--narrow",
        PAGE_CAT_PUBLIC => "page page--public",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
