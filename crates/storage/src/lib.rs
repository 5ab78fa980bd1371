//! `shopadmin-storage` — public file store.
//!
//! Abstracts the "public disk": a flat path-addressed store whose contents
//! are served directly to end users. Producers `put` bytes under a namespace
//! and get back the path to record on the owning entity; `delete` removes a
//! previously recorded path.
//!
//! The store and the database fail independently. Callers own the ordering of
//! file and record mutations and must tolerate transient inconsistency
//! between the two.

use async_trait::async_trait;
use thiserror::Error;

pub mod disk;
pub mod memory;

pub use disk::PublicDiskStore;
pub use memory::{InMemoryFileStore, StoreOp};

/// File store failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io failure at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no stored file at {0}")]
    Missing(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// An uploaded file as it arrives from the request layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size in kilobytes, rounded up.
    pub fn size_kb(&self) -> usize {
        self.bytes.len().div_ceil(1024)
    }

    /// Lowercased extension from the original filename, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.filename.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Path-addressed file store scoped to the public visibility domain.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store the file under `namespace` and return the generated path.
    async fn put(&self, namespace: &str, file: &UploadedFile) -> Result<String, StorageError>;

    /// Remove the file at a previously returned path.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        let file = UploadedFile::new("Photo.JPG", "image/jpeg", vec![1]);
        assert_eq!(file.extension().as_deref(), Some("jpg"));
    }

    #[test]
    fn extension_absent_for_bare_names() {
        assert_eq!(UploadedFile::new("photo", "image/png", vec![]).extension(), None);
        assert_eq!(UploadedFile::new("photo.", "image/png", vec![]).extension(), None);
    }

    #[test]
    fn size_rounds_up_to_whole_kilobytes() {
        assert_eq!(UploadedFile::new("a.png", "image/png", vec![0; 1]).size_kb(), 1);
        assert_eq!(UploadedFile::new("a.png", "image/png", vec![0; 1025]).size_kb(), 2);
    }
}
