use contracts::shared::pagination::{PaginationError, PaginationState};
use contracts::shared::upload::FileCandidate;
use leptos::prelude::*;
use uuid::Uuid;

/// Баннер, принятый диалогом загрузки и ожидающий отправки
#[derive(Clone, Debug, PartialEq)]
pub struct StagedBanner {
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl<S> From<&FileCandidate<S>> for StagedBanner {
    fn from(file: &FileCandidate<S>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: file.name.clone(),
            content_type: file.content_type.clone(),
            size_bytes: file.size_bytes,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BannersListState {
    pub banners: Vec<StagedBanner>,
    // Клиентская пагинация
    pub pagination: PaginationState,
}

impl BannersListState {
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        Ok(Self {
            banners: Vec::new(),
            pagination: PaginationState::new(0, page_size, 1)?,
        })
    }

    /// Добавляет баннеры и переходит на последнюю страницу, где они оказались
    pub fn add(&mut self, banners: impl IntoIterator<Item = StagedBanner>) {
        let before = self.banners.len();
        self.banners.extend(banners);
        if self.banners.len() == before {
            return;
        }
        let pagination = self.pagination.with_total_items(self.banners.len());
        self.pagination = pagination.go_to_page(pagination.total_pages() as i64);
    }

    pub fn remove(&mut self, id: Uuid) {
        self.banners.retain(|b| b.id != id);
        self.pagination = self.pagination.with_total_items(self.banners.len());
    }

    /// Строки текущей страницы
    pub fn page_rows(&self) -> Vec<StagedBanner> {
        self.pagination.page_slice(&self.banners).to_vec()
    }
}

pub fn create_state(page_size: usize) -> Result<RwSignal<BannersListState>, PaginationError> {
    Ok(RwSignal::new(BannersListState::new(page_size)?))
}
