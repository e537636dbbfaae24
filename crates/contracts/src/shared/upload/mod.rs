//! Bounded multi-file upload with previews
//!
//! An `UploadBatch` collects the files picked during one upload dialog
//! session. Each accepted file is stored together with the preview handle
//! acquired for it, so files and previews cannot drift apart, and every
//! handle goes back to the `PreviewProvider` on removal, reset, submit
//! or drop.

mod batch;
mod provider;
mod types;

pub use batch::{UploadBatch, UploadEntry};
pub use provider::{PreviewError, PreviewProvider};
pub use types::{FileCandidate, Rejection, RejectionReason, UploadError, UploadLimits};
