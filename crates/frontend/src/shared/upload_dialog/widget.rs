use super::format_size;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::preview::ObjectUrlProvider;
use contracts::shared::upload::{FileCandidate, Rejection, UploadBatch, UploadLimits};
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;
use wasm_bindgen::JsCast;

/// Строка списка превью (всё, что нужно для отрисовки, без `web_sys::File`)
#[derive(Debug, Clone, PartialEq)]
struct PreviewRow {
    id: Uuid,
    name: String,
    size_bytes: u64,
    url: String,
}

type BrowserBatch = UploadBatch<ObjectUrlProvider>;

/// Уникальный id file input, чтобы label одного диалога не цеплял input другого
fn file_input_id() -> String {
    format!("upload-dialog-input-{}", Uuid::new_v4())
}

fn preview_rows(batch: &BrowserBatch) -> Vec<PreviewRow> {
    batch
        .entries()
        .iter()
        .map(|entry| PreviewRow {
            id: entry.id,
            name: entry.file.name.clone(),
            size_bytes: entry.file.size_bytes,
            url: entry.preview.clone(),
        })
        .collect()
}

fn selected_files(ev: &web_sys::Event) -> Vec<FileCandidate<web_sys::File>> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };

    let candidates = match input.files() {
        Some(files) => (0..files.length())
            .filter_map(|i| files.get(i))
            .map(|file| {
                FileCandidate::new(file.name(), file.type_(), file.size() as u64, file)
            })
            .collect(),
        None => Vec::new(),
    };

    // Сбрасываем input, чтобы повторный выбор того же файла снова вызвал change
    input.set_value("");
    candidates
}

#[component]
pub fn UploadDialog(
    /// Заголовок окна
    #[prop(into)]
    title: String,
    /// Ограничения на количество, тип и размер файлов
    limits: UploadLimits,
    /// Принятые файлы в порядке выбора
    on_submit: Callback<Vec<FileCandidate<web_sys::File>>>,
    /// Callback при отмене
    on_cancel: Callback<()>,
) -> impl IntoView {
    let accept = limits.accept_attribute();
    let input_id = file_input_id();
    let max_files = limits.max_files;

    let batch = match UploadBatch::new(limits, ObjectUrlProvider) {
        Ok(batch) => StoredValue::new_local(batch),
        Err(e) => {
            log::error!("UploadDialog: {}", e);
            return view! {
                <Modal title=title on_close=on_cancel>
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e.to_string()}</span>
                    </div>
                </Modal>
            }
            .into_any();
        }
    };

    let (rows, set_rows) = signal(Vec::<PreviewRow>::new());
    let (rejections, set_rejections) = signal(Vec::<Rejection>::new());

    let sync_rows = move || {
        let current = batch.try_with_value(preview_rows).unwrap_or_default();
        set_rows.set(current);
    };

    // Закрытие вкладки/размонтирование: превью освобождаются всегда
    on_cleanup(move || {
        batch.try_update_value(|b| b.release_all());
    });

    let handle_file_select = move |ev: web_sys::Event| {
        let candidates = selected_files(&ev);
        if candidates.is_empty() {
            return;
        }
        let rejected = batch
            .try_update_value(|b| b.validate_and_append(candidates))
            .unwrap_or_default();
        set_rejections.set(rejected);
        sync_rows();
    };

    let remove_entry = move |id: Uuid| {
        if let Some(Err(e)) = batch.try_update_value(|b| b.remove_by_id(id)) {
            log::warn!("UploadDialog: {}", e);
        }
        sync_rows();
    };

    let handle_cancel = move || {
        batch.try_update_value(|b| b.release_all());
        sync_rows();
        set_rejections.set(Vec::new());
        on_cancel.run(());
    };

    let handle_submit = move |_| {
        let files = batch
            .try_update_value(|b| b.take_files())
            .unwrap_or_default();
        sync_rows();
        set_rejections.set(Vec::new());
        if !files.is_empty() {
            on_submit.run(files);
        }
    };

    let is_empty = Signal::derive(move || rows.with(|r| r.is_empty()));

    view! {
        <Modal title=title on_close=Callback::new(move |_| handle_cancel())>
            <div class="upload-dialog">
                <div class="upload-dialog__filebar">
                    <label class="button button--primary upload-dialog__file-btn" for=input_id.clone()>
                        {icon("upload")}
                        " Выбрать файлы"
                    </label>
                    <input
                        id=input_id
                        type="file"
                        multiple=true
                        accept=accept
                        on:change=handle_file_select
                        class="hidden"
                    />
                    <span class="upload-dialog__counter">
                        {move || format!("{} / {}", rows.with(|r| r.len()), max_files)}
                    </span>
                </div>

                {move || {
                    let current = rejections.get();
                    (!current.is_empty()).then(|| view! {
                        <div class="warning-box warning-box--error upload-dialog__rejections">
                            <span class="warning-box__icon">"⚠"</span>
                            <ul class="warning-box__text">
                                {current.iter().map(|r| view! { <li>{r.message()}</li> }).collect_view()}
                            </ul>
                        </div>
                    })
                }}

                <Show
                    when=move || !is_empty.get()
                    fallback=|| view! { <span class="upload-dialog__hint">"Файлы не выбраны"</span> }
                >
                    <div class="upload-dialog__previews">
                        <For
                            each=move || rows.get()
                            key=|row| row.id
                            children=move |row| {
                                let id = row.id;
                                view! {
                                    <div class="upload-dialog__preview">
                                        <img src=row.url alt=row.name.clone() />
                                        <div class="upload-dialog__preview-info">
                                            <span class="upload-dialog__preview-name">{row.name}</span>
                                            <span class="upload-dialog__preview-size">{format_size(row.size_bytes)}</span>
                                        </div>
                                        <button
                                            class="button button--icon"
                                            title="Убрать"
                                            on:click=move |_| remove_entry(id)
                                        >
                                            {icon("trash")}
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>

                <div class="upload-dialog__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| handle_cancel()
                    >
                        {icon("x")}
                        " Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_submit
                        disabled=is_empty
                    >
                        {icon("upload")}
                        " Загрузить"
                    </Button>
                </div>
            </div>
        </Modal>
    }
    .into_any()
}
