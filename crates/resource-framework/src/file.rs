//! Loading a local file into a form.
//!
//! Files are checked against a size bound and an allow-list of content types before
//! their bytes are hashed. Failures never travel on the save error path: callers hand
//! them to [`FileLoader::load_into`], which broadcasts them on the [`EventManager`].

use crate::events::{AppEvent, EventManager};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum FileLoadError {
    #[error("File is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("Content type {0} is not allowed")]
    NotAllowed(String),

    #[error("Could not read file: {0}")]
    Read(#[from] std::io::Error),
}

impl FileLoadError {
    /// Message key for alerts.
    pub fn key(&self) -> &'static str {
        match self {
            FileLoadError::TooLarge { .. } => "error.file.too.large",
            FileLoadError::NotAllowed(_) => "error.file.not.allowed",
            FileLoadError::Read(_) => "error.file.read",
        }
    }
}

/// What a form keeps of a loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    /// SHA-256 of the content, lowercase hex.
    pub checksum: String,
    /// The content, when it is valid UTF-8 (for text blob fields).
    pub text: Option<String>,
}

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Content type from the file extension; `application/octet-stream` when unknown.
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone)]
pub struct FileLoader {
    max_bytes: u64,
    allowed: Vec<String>,
}

impl FileLoader {
    /// Accepts any content type up to `max_bytes`.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            allowed: Vec::new(),
        }
    }

    /// Restricts content types. A trailing `/*` allows a whole family (`image/*`).
    pub fn allow(mut self, content_type: impl Into<String>) -> Self {
        self.allowed.push(content_type.into());
        self
    }

    fn is_allowed(&self, mime: &str) -> bool {
        self.allowed.is_empty()
            || self.allowed.iter().any(|allowed| match allowed.strip_suffix("/*") {
                Some(family) => mime.split('/').next() == Some(family),
                None => allowed == mime,
            })
    }

    pub async fn load(&self, path: impl AsRef<Path>) -> Result<LoadedFile, FileLoadError> {
        let path = path.as_ref();
        let size = tokio::fs::metadata(path).await?.len();
        if size > self.max_bytes {
            return Err(FileLoadError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        let mime_type = mime_from_path(path);
        if !self.is_allowed(mime_type) {
            return Err(FileLoadError::NotAllowed(mime_type.to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(%file_name, size, mime_type, "File loaded");
        Ok(LoadedFile {
            file_name,
            mime_type: mime_type.to_string(),
            size: bytes.len() as u64,
            checksum: sha256_hex(&bytes),
            text: String::from_utf8(bytes).ok(),
        })
    }

    /// Loads `path` for `field`; a failure is broadcast and yields `None`.
    pub async fn load_into(
        &self,
        path: impl AsRef<Path>,
        field: &str,
        events: &EventManager,
    ) -> Option<LoadedFile> {
        match self.load(path).await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(field, error = %e, "File load failed");
                events.broadcast(AppEvent::FileLoadFailed {
                    field: field.to_string(),
                    key: e.key().to_string(),
                    message: e.to_string(),
                });
                None
            }
        }
    }
}
