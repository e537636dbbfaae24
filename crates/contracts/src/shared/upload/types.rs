use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Limits of one upload dialog, taken from dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    /// Ceiling on the number of files in a batch
    pub max_files: usize,
    /// Accepted MIME types, compared case-insensitively
    pub allowed_types: Vec<String>,
    /// Per-file size ceiling
    pub max_size_bytes: u64,
}

impl UploadLimits {
    pub fn new(
        max_files: usize,
        allowed_types: impl IntoIterator<Item = impl Into<String>>,
        max_size_bytes: u64,
    ) -> Self {
        Self {
            max_files,
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
            max_size_bytes,
        }
    }

    /// Check the limits and normalize the type list (trimmed, lowercase, no duplicates)
    pub fn validated(mut self) -> Result<Self, UploadError> {
        if self.max_files == 0 {
            return Err(UploadError::InvalidConfiguration(
                "max_files must be positive".to_string(),
            ));
        }
        if self.max_size_bytes == 0 {
            return Err(UploadError::InvalidConfiguration(
                "max_size_bytes must be positive".to_string(),
            ));
        }

        let mut allowed: Vec<String> = Vec::with_capacity(self.allowed_types.len());
        for mime in &self.allowed_types {
            let mime = normalize_mime(mime);
            if !mime.is_empty() && !allowed.contains(&mime) {
                allowed.push(mime);
            }
        }
        if allowed.is_empty() {
            return Err(UploadError::InvalidConfiguration(
                "allowed_types must list at least one MIME type".to_string(),
            ));
        }
        self.allowed_types = allowed;
        Ok(self)
    }

    /// Whether `content_type` is on the allow-list. MIME parameters are ignored.
    pub fn allows_type(&self, content_type: &str) -> bool {
        let mime = normalize_mime(content_type);
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&mime))
    }

    /// Value for the `accept` attribute of a file input
    pub fn accept_attribute(&self) -> String {
        self.allowed_types.join(",")
    }
}

fn normalize_mime(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// A file picked by the user, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate<S> {
    pub name: String,
    /// Declared content type, as reported by the file input
    pub content_type: String,
    pub size_bytes: u64,
    /// Raw file reference used to build the preview and, later, the upload body
    pub source: S,
}

impl<S> FileCandidate<S> {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
        source: S,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size_bytes,
            source,
        }
    }
}

/// Why a candidate file was not admitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("Too many files: {available} slot(s) available")]
    CapacityExceeded { available: usize },

    #[error("Unsupported file type: {content_type}")]
    InvalidType { content_type: String },

    #[error("File is too large: {size_bytes} bytes (limit {max_size_bytes} bytes)")]
    TooLarge { size_bytes: u64, max_size_bytes: u64 },

    #[error("Preview could not be created: {message}")]
    PreviewUnavailable { message: String },
}

/// Per-file validation failure returned alongside the updated batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub file_name: String,
    pub reason: RejectionReason,
}

impl Rejection {
    pub fn new(file_name: impl Into<String>, reason: RejectionReason) -> Self {
        Self {
            file_name: file_name.into(),
            reason,
        }
    }

    /// "name: reason" line for the rejection list
    pub fn message(&self) -> String {
        format!("{}: {}", self.file_name, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Invalid upload configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Index {index} is out of range for a batch of {len} file(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No file with id {0} in the batch")]
    UnknownEntry(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_normalize_types() {
        let limits = UploadLimits::new(5, [" Image/PNG ", "image/png", "image/jpeg"], 1024)
            .validated()
            .unwrap();
        assert_eq!(limits.allowed_types, vec!["image/png", "image/jpeg"]);
        assert_eq!(limits.accept_attribute(), "image/png,image/jpeg");
    }

    #[test]
    fn test_limits_reject_bad_configuration() {
        assert!(UploadLimits::new(0, ["image/png"], 1024).validated().is_err());
        assert!(UploadLimits::new(3, ["image/png"], 0).validated().is_err());
        assert!(UploadLimits::new(3, Vec::<String>::new(), 1024)
            .validated()
            .is_err());
        assert!(UploadLimits::new(3, ["  "], 1024).validated().is_err());
    }

    #[test]
    fn test_type_check_is_case_insensitive_and_ignores_parameters() {
        let limits = UploadLimits::new(1, ["image/png"], 1).validated().unwrap();
        assert!(limits.allows_type("IMAGE/PNG"));
        assert!(limits.allows_type("image/png; charset=binary"));
        assert!(!limits.allows_type("image/gif"));
        assert!(!limits.allows_type(""));
    }

    #[test]
    fn test_capacity_message_states_available_slots() {
        let rejection = Rejection::new(
            "banner.png",
            RejectionReason::CapacityExceeded { available: 2 },
        );
        assert_eq!(
            rejection.message(),
            "banner.png: Too many files: 2 slot(s) available"
        );
    }

    #[test]
    fn test_rejection_json_is_tagged() {
        let rejection = Rejection::new(
            "huge.jpg",
            RejectionReason::TooLarge {
                size_bytes: 50,
                max_size_bytes: 10,
            },
        );
        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(json["file_name"], "huge.jpg");
        assert_eq!(json["reason"]["kind"], "too_large");
        assert_eq!(json["reason"]["max_size_bytes"], 10);

        let back: Rejection = serde_json::from_value(json).unwrap();
        assert_eq!(back, rejection);
    }
}
