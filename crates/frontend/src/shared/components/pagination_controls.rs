use crate::shared::icons::icon;
use contracts::shared::pagination::{PageItem, PaginationState};
use leptos::prelude::*;

const DEFAULT_MAX_VISIBLE_PAGES: usize = 7;

/// "41–47 из 47" summary for the current page
pub fn range_label(state: &PaginationState) -> String {
    match state.end_index() {
        Some(end) => format!("{}–{} из {}", state.start_index() + 1, end + 1, state.total_items()),
        None => "Нет записей".to_string(),
    }
}

/// PaginationControls component - reusable pagination controls
///
/// All page math comes from `PaginationState`; the component only turns
/// clicks into `on_page_change` (1-based page) and `on_page_size_change`.
/// Page buttons are hidden when everything fits on one page.
#[component]
pub fn PaginationControls(
    /// Current pagination state of the list
    #[prop(into)]
    state: Signal<PaginationState>,

    /// Callback when page changes (1-based)
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Available page size options (optional, defaults to [10, 25, 50, 100])
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,

    /// Width of the page-button window, first and last page included
    #[prop(optional)]
    max_visible_pages: Option<usize>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![10, 25, 50, 100]);
    let max_visible = max_visible_pages.unwrap_or(DEFAULT_MAX_VISIBLE_PAGES);

    let go_to = move |page: usize| {
        if page != state.get_untracked().current_page() {
            on_page_change.run(page);
        }
    };

    let page_buttons = move || {
        let current = state.get();
        if current.total_pages() <= 1 {
            return Vec::new();
        }
        current
            .visible_page_window(max_visible)
            .into_iter()
            .map(|item| match item {
                PageItem::Page(page) => {
                    let is_current = page == current.current_page();
                    let class = if is_current {
                        "pagination-btn pagination-btn--active"
                    } else {
                        "pagination-btn"
                    };
                    view! {
                        <button class=class on:click=move |_| go_to(page) disabled=is_current>
                            {page.to_string()}
                        </button>
                    }
                    .into_any()
                }
                PageItem::Gap => view! { <span class="pagination-gap">"…"</span> }.into_any(),
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| go_to(1)
                disabled=move || !state.get().has_previous_page()
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(state.get_untracked().previous_page().current_page())
                disabled=move || !state.get().has_previous_page()
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            {page_buttons}
            <button
                class="pagination-btn"
                on:click=move |_| go_to(state.get_untracked().next_page().current_page())
                disabled=move || !state.get().has_next_page()
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(state.get_untracked().total_pages())
                disabled=move || !state.get().has_next_page()
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
            <span class="pagination-info">{move || range_label(&state.get())}</span>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || state.get().items_per_page().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option
                            value={size.to_string()}
                            selected=move || state.get().items_per_page() == size
                        >
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
