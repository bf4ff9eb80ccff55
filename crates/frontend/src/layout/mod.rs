pub mod footer;
pub mod top_header;

use footer::Footer;
use leptos::prelude::*;
use top_header::TopHeader;

/// Application shell for signed-in pages.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |              Content                     |
/// +------------------------------------------+
/// |              Footer                      |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <main class="app-main">
                {children()}
            </main>
            <Footer />
        </div>
    }
}
