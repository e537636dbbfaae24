use crate::domain::banners::ui::list::BannersList;
use crate::shared::config::load_config;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    match load_config() {
        Ok(config) => view! { <BannersList config=config /> }.into_any(),
        Err(e) => {
            log::error!("Failed to load dashboard configuration: {:#}", e);
            view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">
                        {format!("Ошибка конфигурации: {}", e)}
                    </span>
                </div>
            }
            .into_any()
        }
    }
}
