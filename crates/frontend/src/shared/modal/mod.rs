use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Модальное окно: оверлей, заголовок с кнопкой закрытия, тело
///
/// Закрывается по Escape, клику по оверлею и кнопке "x".
#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let request_close = move || on_close.run(());

    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            request_close();
        }
    });
    on_cleanup(move || keydown.remove());

    // Prevent click propagation from modal content
    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| request_close()>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        <button
                            class="button button--icon modal__close"
                            on:click=move |_| request_close()
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
