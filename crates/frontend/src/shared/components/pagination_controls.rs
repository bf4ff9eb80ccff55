use crate::shared::icons::icon;
use contracts::domain::a001_car::PAGE_SIZES;
use leptos::prelude::*;

/// `"11–20 z 45"` for a 0-based page; `"0 z 0"` when nothing matched.
pub fn range_label(page: usize, page_size: usize, total: usize) -> String {
    if total == 0 || page_size == 0 {
        return "0 z 0".to_string();
    }
    let first = (page * page_size + 1).min(total);
    let last = ((page + 1) * page_size).min(total);
    format!("{}–{} z {}", first, last, total)
}

#[component]
fn PageButton(
    icon_name: &'static str,
    title: &'static str,
    #[prop(into)] disabled: Signal<bool>,
    on_press: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button class="pagination-btn" title=title disabled=move || disabled.get() on:click=move |_| on_press()>
            {icon(icon_name)}
        </button>
    }
}

/// First/previous/next/last buttons plus the page-size select.
///
/// Everything is inert while `total_count` is 0.
#[component]
pub fn PaginationControls(
    /// 0-based
    #[prop(into)]
    current_page: Signal<usize>,
    #[prop(into)]
    total_pages: Signal<usize>,
    #[prop(into)]
    total_count: Signal<usize>,
    #[prop(into)]
    page_size: Signal<usize>,
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,
) -> impl IntoView {
    let is_empty = Signal::derive(move || total_count.get() == 0);
    let at_start = Signal::derive(move || is_empty.get() || current_page.get() == 0);
    let at_end = Signal::derive(move || is_empty.get() || current_page.get() + 1 >= total_pages.get());

    let go = move |target: usize| {
        if target != current_page.get_untracked() {
            on_page_change.run(target);
        }
    };

    view! {
        <div class="pagination-controls">
            <PageButton icon_name="chevrons-left" title="Pierwsza strona" disabled=at_start on_press=move || go(0) />
            <PageButton
                icon_name="chevron-left"
                title="Poprzednia strona"
                disabled=at_start
                on_press=move || go(current_page.get_untracked().saturating_sub(1))
            />
            <span class="pagination-info">
                {move || range_label(current_page.get(), page_size.get(), total_count.get())}
            </span>
            <PageButton
                icon_name="chevron-right"
                title="Następna strona"
                disabled=at_end
                on_press=move || go(current_page.get_untracked() + 1)
            />
            <PageButton
                icon_name="chevrons-right"
                title="Ostatnia strona"
                disabled=at_end
                on_press=move || go(total_pages.get_untracked().saturating_sub(1))
            />

            <label class="page-size">
                "Wierszy na stronę:"
                <select
                    class="page-size-select"
                    disabled=move || is_empty.get()
                    prop:value=move || page_size.get().to_string()
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<usize>() {
                            Ok(size) => on_page_size_change.run(size),
                            Err(_) => log::warn!("Ignoring invalid page size"),
                        }
                    }
                >
                    {PAGE_SIZES
                        .iter()
                        .map(|&size| view! {
                            <option value=size selected=move || page_size.get() == size>{size}</option>
                        })
                        .collect_view()}
                </select>
            </label>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_of_middle_and_last_page() {
        assert_eq!(range_label(1, 10, 45), "11–20 z 45");
        assert_eq!(range_label(4, 10, 45), "41–45 z 45");
    }

    #[test]
    fn empty_result_has_zero_range() {
        assert_eq!(range_label(0, 10, 0), "0 z 0");
        assert_eq!(range_label(3, 0, 12), "0 z 0");
    }
}
