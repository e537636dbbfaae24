use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Preview unavailable: {0}")]
pub struct PreviewError(pub String);

/// Host capability that turns a selected file into a renderable preview.
///
/// In the browser this is `URL.createObjectURL` / `URL.revokeObjectURL`;
/// every handle returned by `acquire` must eventually be passed to `release`.
pub trait PreviewProvider {
    /// Raw file reference handed over by the file input
    type Source;
    /// Opaque preview reference (an object URL, a thumbnail id...)
    type Handle;

    fn acquire(&mut self, source: &Self::Source) -> Result<Self::Handle, PreviewError>;

    fn release(&mut self, handle: Self::Handle);
}
