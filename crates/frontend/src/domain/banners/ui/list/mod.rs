pub mod state;

use self::state::{create_state, StagedBanner};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::DashboardConfig;
use crate::shared::icons::icon;
use crate::shared::upload_dialog::{format_size, UploadDialog};
use contracts::shared::upload::FileCandidate;
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

#[component]
pub fn BannersList(config: DashboardConfig) -> impl IntoView {
    let DashboardConfig { pagination, upload } = config;

    let state = match create_state(pagination.page_size) {
        Ok(state) => state,
        Err(e) => {
            log::error!("BannersList: {}", e);
            return view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e.to_string()}</span>
                </div>
            }
            .into_any();
        }
    };
    let (show_upload, set_show_upload) = signal(false);

    let go_to_page = move |page: usize| {
        state.update(|s| s.pagination = s.pagination.go_to_page(page as i64));
    };

    let change_page_size = move |size: usize| {
        state.update(|s| match s.pagination.with_items_per_page(size) {
            Ok(pagination) => s.pagination = pagination,
            Err(e) => log::warn!("BannersList: {}", e),
        });
    };

    let remove_banner = move |id: Uuid| {
        state.update(|s| s.remove(id));
    };

    let handle_submit = move |files: Vec<FileCandidate<web_sys::File>>| {
        log::info!("BannersList: {} banner(s) staged", files.len());
        state.update(|s| s.add(files.iter().map(StagedBanner::from)));
        set_show_upload.set(false);
    };

    let pagination_signal = Signal::derive(move || state.get().pagination);
    let upload_limits = StoredValue::new(upload);

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Баннеры"</h1>
                    <span class="badge badge--primary">
                        {move || state.with(|s| s.banners.len()).to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_upload.set(true)
                    >
                        {icon("image")}
                        " Добавить баннеры"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <PaginationControls
                    state=pagination_signal
                    on_page_change=Callback::new(go_to_page)
                    on_page_size_change=Callback::new(change_page_size)
                    page_size_options=pagination.page_size_options.clone()
                    max_visible_pages=pagination.max_visible_pages
                />

                <table class="table">
                    <thead>
                        <tr>
                            <th>"Файл"</th>
                            <th>"Тип"</th>
                            <th class="table__cell--right">"Размер"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || state.with(|s| s.page_rows())
                            key=|row| row.id
                            children=move |row| {
                                let id = row.id;
                                view! {
                                    <tr>
                                        <td>{row.name}</td>
                                        <td>{row.content_type}</td>
                                        <td class="table__cell--right">{format_size(row.size_bytes)}</td>
                                        <td>
                                            <button
                                                class="button button--icon"
                                                title="Удалить"
                                                on:click=move |_| remove_banner(id)
                                            >
                                                {icon("trash")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <Show when=move || show_upload.get()>
                <UploadDialog
                    title="Загрузка баннеров"
                    limits=upload_limits.get_value()
                    on_submit=Callback::new(handle_submit)
                    on_cancel=Callback::new(move |_| set_show_upload.set(false))
                />
            </Show>
        </div>
    }
    .into_any()
}
