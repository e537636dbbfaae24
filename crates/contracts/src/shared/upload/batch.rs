use super::provider::PreviewProvider;
use super::types::{FileCandidate, Rejection, RejectionReason, UploadError, UploadLimits};
use uuid::Uuid;

/// Accepted file together with its preview handle
#[derive(Debug, PartialEq)]
pub struct UploadEntry<S, H> {
    /// Stable key for rendering and keyed removal
    pub id: Uuid,
    pub file: FileCandidate<S>,
    pub preview: H,
}

/// Files accepted during one upload dialog session.
///
/// The batch owns the preview provider. Files and previews live in a single
/// sequence of entries, so `files()` and `previews()` are always the same
/// length and index-aligned. Handles are released on `remove`, `release_all`,
/// `reset`, `take_files` and when the batch is dropped.
pub struct UploadBatch<P: PreviewProvider> {
    limits: UploadLimits,
    provider: P,
    entries: Vec<UploadEntry<P::Source, P::Handle>>,
}

impl<P: PreviewProvider> UploadBatch<P> {
    /// Empty batch; fails when the limits are unusable
    pub fn new(limits: UploadLimits, provider: P) -> Result<Self, UploadError> {
        Ok(Self {
            limits: limits.validated()?,
            provider,
            entries: Vec::new(),
        })
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn entries(&self) -> &[UploadEntry<P::Source, P::Handle>] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileCandidate<P::Source>> {
        self.entries.iter().map(|entry| &entry.file)
    }

    pub fn previews(&self) -> impl Iterator<Item = &P::Handle> {
        self.entries.iter().map(|entry| &entry.preview)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.remaining_slots() == 0
    }

    pub fn remaining_slots(&self) -> usize {
        self.limits.max_files.saturating_sub(self.entries.len())
    }

    /// Validate newly selected files and append the accepted ones.
    ///
    /// A selection larger than the free slots is rejected as a whole with
    /// `CapacityExceeded` and leaves the batch untouched. Otherwise each file
    /// is checked on its own (type, then size) and accepted files are
    /// appended in selection order, each with a freshly acquired preview.
    pub fn validate_and_append(
        &mut self,
        candidates: impl IntoIterator<Item = FileCandidate<P::Source>>,
    ) -> Vec<Rejection> {
        let candidates: Vec<_> = candidates.into_iter().collect();
        let available = self.remaining_slots();

        if candidates.len() > available {
            log::warn!(
                "upload: {} file(s) selected, {} slot(s) available, selection rejected",
                candidates.len(),
                available
            );
            return candidates
                .into_iter()
                .map(|file| Rejection::new(file.name, RejectionReason::CapacityExceeded { available }))
                .collect();
        }

        let mut rejections = Vec::new();
        for file in candidates {
            match self.admit(&file) {
                Ok(preview) => {
                    log::debug!("upload: accepted {} ({} bytes)", file.name, file.size_bytes);
                    self.entries.push(UploadEntry {
                        id: Uuid::new_v4(),
                        file,
                        preview,
                    });
                }
                Err(reason) => {
                    log::warn!("upload: rejected {}: {}", file.name, reason);
                    rejections.push(Rejection::new(file.name, reason));
                }
            }
        }
        rejections
    }

    fn admit(&mut self, file: &FileCandidate<P::Source>) -> Result<P::Handle, RejectionReason> {
        if !self.limits.allows_type(&file.content_type) {
            return Err(RejectionReason::InvalidType {
                content_type: file.content_type.clone(),
            });
        }
        if file.size_bytes > self.limits.max_size_bytes {
            return Err(RejectionReason::TooLarge {
                size_bytes: file.size_bytes,
                max_size_bytes: self.limits.max_size_bytes,
            });
        }
        self.provider
            .acquire(&file.source)
            .map_err(|e| RejectionReason::PreviewUnavailable { message: e.0 })
    }

    /// Release the preview at `index` and drop the entry, shifting later ones down
    pub fn remove(&mut self, index: usize) -> Result<FileCandidate<P::Source>, UploadError> {
        let len = self.entries.len();
        if index >= len {
            log::warn!("upload: remove({}) on a batch of {}", index, len);
            return Err(UploadError::IndexOutOfRange { index, len });
        }
        let entry = self.entries.remove(index);
        self.provider.release(entry.preview);
        Ok(entry.file)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<FileCandidate<P::Source>, UploadError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(UploadError::UnknownEntry(id))?;
        self.remove(index)
    }

    /// Release every preview and empty the batch
    pub fn release_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        log::debug!("upload: releasing {} preview(s)", self.entries.len());
        for entry in self.entries.drain(..) {
            self.provider.release(entry.preview);
        }
    }

    /// Start over with an empty batch under the same limits
    pub fn reset(&mut self) {
        self.release_all();
    }

    /// Submit path: release every preview and hand back the files in acceptance order
    pub fn take_files(&mut self) -> Vec<FileCandidate<P::Source>> {
        let entries = std::mem::take(&mut self.entries);
        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            self.provider.release(entry.preview);
            files.push(entry.file);
        }
        files
    }
}

impl<P: PreviewProvider> Drop for UploadBatch<P> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::super::provider::PreviewError;
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    const MB: u64 = 1024 * 1024;

    #[derive(Default)]
    struct Ledger {
        next: u32,
        live: BTreeSet<u32>,
        released: Vec<u32>,
    }

    /// Hands out numbered handles and records every release
    #[derive(Clone, Default)]
    struct RecordingProvider {
        ledger: Rc<RefCell<Ledger>>,
        fail_for: Option<String>,
    }

    impl RecordingProvider {
        fn live(&self) -> usize {
            self.ledger.borrow().live.len()
        }

        fn released(&self) -> Vec<u32> {
            self.ledger.borrow().released.clone()
        }
    }

    impl PreviewProvider for RecordingProvider {
        type Source = String;
        type Handle = u32;

        fn acquire(&mut self, source: &String) -> Result<u32, PreviewError> {
            if self.fail_for.as_deref() == Some(source.as_str()) {
                return Err(PreviewError("blob is gone".to_string()));
            }
            let mut ledger = self.ledger.borrow_mut();
            ledger.next += 1;
            let handle = ledger.next;
            ledger.live.insert(handle);
            Ok(handle)
        }

        fn release(&mut self, handle: u32) {
            let mut ledger = self.ledger.borrow_mut();
            assert!(ledger.live.remove(&handle), "handle {handle} released twice");
            ledger.released.push(handle);
        }
    }

    fn image_limits(max_files: usize) -> UploadLimits {
        UploadLimits::new(max_files, ["image/jpeg", "image/png"], 10 * MB)
    }

    fn png(name: &str, size: u64) -> FileCandidate<String> {
        FileCandidate::new(name, "image/png", size, name.to_string())
    }

    fn jpeg(name: &str, size: u64) -> FileCandidate<String> {
        FileCandidate::new(name, "image/jpeg", size, name.to_string())
    }

    fn snapshot(batch: &UploadBatch<RecordingProvider>) -> Vec<(String, u32)> {
        batch
            .entries()
            .iter()
            .map(|entry| (entry.file.name.clone(), entry.preview))
            .collect()
    }

    fn assert_aligned(batch: &UploadBatch<RecordingProvider>) {
        assert_eq!(batch.files().count(), batch.previews().count());
        assert_eq!(batch.provider().live(), batch.len());
    }

    #[test]
    fn test_invalid_limits_are_rejected() {
        let provider = RecordingProvider::default();
        assert!(matches!(
            UploadBatch::new(image_limits(0), provider),
            Err(UploadError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_too_large_file_is_rejected_others_accepted() {
        let mut batch = UploadBatch::new(image_limits(10), RecordingProvider::default()).unwrap();

        let rejections =
            batch.validate_and_append(vec![png("small.png", 2 * MB), jpeg("huge.jpg", 50 * MB)]);

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.files().next().unwrap().name, "small.png");
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].file_name, "huge.jpg");
        assert!(matches!(rejections[0].reason, RejectionReason::TooLarge { .. }));
        assert_aligned(&batch);
    }

    #[test]
    fn test_oversized_selection_is_rejected_whole() {
        let mut batch = UploadBatch::new(image_limits(10), RecordingProvider::default()).unwrap();
        let first: Vec<_> = (0..8).map(|i| png(&format!("{i}.png"), MB)).collect();
        assert!(batch.validate_and_append(first).is_empty());
        let before = snapshot(&batch);

        let rejections = batch.validate_and_append(vec![
            png("a.png", MB),
            png("b.png", MB),
            png("c.png", MB),
        ]);

        assert_eq!(rejections.len(), 3);
        for rejection in &rejections {
            assert_eq!(
                rejection.reason,
                RejectionReason::CapacityExceeded { available: 2 }
            );
            assert!(rejection.message().contains("2 slot(s) available"));
        }
        assert_eq!(snapshot(&batch), before);
        assert_eq!(batch.len(), 8);
        assert_aligned(&batch);
    }

    #[test]
    fn test_full_batch_rejects_everything() {
        let mut batch = UploadBatch::new(image_limits(2), RecordingProvider::default()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1), png("b.png", 1)]);
        assert!(batch.is_full());

        let rejections = batch.validate_and_append(vec![png("c.png", 1)]);
        assert_eq!(
            rejections,
            vec![Rejection::new(
                "c.png",
                RejectionReason::CapacityExceeded { available: 0 }
            )]
        );
        assert_eq!(batch.len(), 2);
        assert!(batch.validate_and_append(Vec::new()).is_empty());
    }

    #[test]
    fn test_selection_filling_exactly_the_free_slots_is_accepted() {
        let mut batch = UploadBatch::new(image_limits(3), RecordingProvider::default()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1)]);
        let rejections = batch.validate_and_append(vec![png("b.png", 1), png("c.png", 1)]);
        assert!(rejections.is_empty());
        assert!(batch.is_full());
    }

    #[test]
    fn test_mixed_selection_keeps_relative_order() {
        let mut batch = UploadBatch::new(image_limits(10), RecordingProvider::default()).unwrap();
        let selection = vec![
            png("1.png", MB),
            FileCandidate::new("2.gif", "image/gif", MB, "2.gif".to_string()),
            jpeg("3.jpg", MB),
            png("4.png", 11 * MB),
            FileCandidate::new("5.png", "IMAGE/PNG", MB, "5.png".to_string()),
        ];
        let submitted = selection.len();

        let rejections = batch.validate_and_append(selection);

        assert_eq!(batch.len() + rejections.len(), submitted);
        let names: Vec<_> = batch.files().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["1.png", "3.jpg", "5.png"]);
        assert_eq!(
            rejections[0].reason,
            RejectionReason::InvalidType {
                content_type: "image/gif".to_string()
            }
        );
        assert!(matches!(rejections[1].reason, RejectionReason::TooLarge { .. }));
        assert_aligned(&batch);
    }

    #[test]
    fn test_type_is_checked_before_size() {
        let mut batch = UploadBatch::new(image_limits(10), RecordingProvider::default()).unwrap();
        let rejections = batch.validate_and_append(vec![FileCandidate::new(
            "video.mp4",
            "video/mp4",
            500 * MB,
            "video.mp4".to_string(),
        )]);
        assert!(matches!(rejections[0].reason, RejectionReason::InvalidType { .. }));
    }

    #[test]
    fn test_failed_preview_rejects_only_that_file() {
        let provider = RecordingProvider {
            fail_for: Some("b.png".to_string()),
            ..Default::default()
        };
        let mut batch = UploadBatch::new(image_limits(10), provider).unwrap();

        let rejections =
            batch.validate_and_append(vec![png("a.png", 1), png("b.png", 1), png("c.png", 1)]);

        assert_eq!(batch.len(), 2);
        assert_eq!(rejections.len(), 1);
        assert!(matches!(
            rejections[0].reason,
            RejectionReason::PreviewUnavailable { .. }
        ));
        assert_aligned(&batch);
    }

    #[test]
    fn test_remove_releases_handle_and_shifts() {
        let provider = RecordingProvider::default();
        let mut batch = UploadBatch::new(image_limits(10), provider.clone()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1), png("b.png", 1), png("c.png", 1)]);

        let removed = batch.remove(1).unwrap();

        assert_eq!(removed.name, "b.png");
        assert_eq!(provider.released(), vec![2]);
        assert_eq!(snapshot(&batch), vec![("a.png".to_string(), 1), ("c.png".to_string(), 3)]);
        assert_aligned(&batch);
    }

    #[test]
    fn test_remove_out_of_range_fails() {
        let mut batch = UploadBatch::new(image_limits(10), RecordingProvider::default()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1)]);

        assert_eq!(
            batch.remove(1),
            Err(UploadError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(batch.len(), 1);
        assert_aligned(&batch);
    }

    #[test]
    fn test_remove_by_id() {
        let mut batch = UploadBatch::new(image_limits(10), RecordingProvider::default()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1), png("b.png", 1)]);
        let id = batch.entries()[0].id;

        assert_eq!(batch.remove_by_id(id).unwrap().name, "a.png");
        assert_eq!(batch.remove_by_id(id), Err(UploadError::UnknownEntry(id)));
        assert_aligned(&batch);
    }

    #[test]
    fn test_release_all_and_reset_free_every_handle() {
        let provider = RecordingProvider::default();
        let mut batch = UploadBatch::new(image_limits(10), provider.clone()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1), png("b.png", 1)]);

        batch.release_all();
        assert!(batch.is_empty());
        assert_eq!(provider.live(), 0);
        assert_aligned(&batch);

        batch.validate_and_append(vec![png("c.png", 1)]);
        batch.reset();
        assert!(batch.is_empty());
        assert_eq!(provider.live(), 0);
        assert_eq!(batch.remaining_slots(), 10);
    }

    #[test]
    fn test_take_files_releases_and_returns_in_order() {
        let provider = RecordingProvider::default();
        let mut batch = UploadBatch::new(image_limits(10), provider.clone()).unwrap();
        batch.validate_and_append(vec![png("a.png", 1), jpeg("b.jpg", 1)]);

        let files = batch.take_files();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
        assert!(batch.is_empty());
        assert_eq!(provider.live(), 0);
    }

    #[test]
    fn test_drop_releases_remaining_handles() {
        let provider = RecordingProvider::default();
        {
            let mut batch = UploadBatch::new(image_limits(10), provider.clone()).unwrap();
            batch.validate_and_append(vec![png("a.png", 1), png("b.png", 1)]);
            assert_eq!(provider.live(), 2);
        }
        assert_eq!(provider.live(), 0);
        assert_eq!(provider.released().len(), 2);
    }
}
