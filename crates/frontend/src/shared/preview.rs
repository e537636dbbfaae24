use contracts::shared::upload::{PreviewError, PreviewProvider};
use web_sys::{File, Url};

/// Превью выбранных файлов через `URL.createObjectURL`
///
/// Каждый object URL держит blob в памяти вкладки, поэтому он обязан
/// вернуться в `release` (`URL.revokeObjectURL`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectUrlProvider;

impl PreviewProvider for ObjectUrlProvider {
    type Source = File;
    type Handle = String;

    fn acquire(&mut self, file: &File) -> Result<String, PreviewError> {
        Url::create_object_url_with_blob(file)
            .map_err(|e| PreviewError(format!("createObjectURL failed: {:?}", e)))
    }

    fn release(&mut self, url: String) {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("revokeObjectURL failed for {}: {:?}", url, e);
        }
    }
}
