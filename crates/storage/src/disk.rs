//! Filesystem-backed public store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{FileStore, StorageError, UploadedFile};

/// Public disk rooted at a directory that the web layer serves verbatim.
///
/// Stored names are generated (UUIDv7 + original extension) so uploads can
/// never collide with or overwrite each other.
#[derive(Debug, Clone)]
pub struct PublicDiskStore {
    root: PathBuf,
}

impl PublicDiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl FileStore for PublicDiskStore {
    async fn put(&self, namespace: &str, file: &UploadedFile) -> Result<String, StorageError> {
        let name = match file.extension() {
            Some(ext) => format!("{}.{ext}", Uuid::now_v7()),
            None => Uuid::now_v7().to_string(),
        };
        let rel = format!("{namespace}/{name}");
        let full = self.root.join(&rel);

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io(parent, e))?;
        }
        tokio::fs::write(&full, &file.bytes)
            .await
            .map_err(|e| Self::io(&full, e))?;

        tracing::debug!(path = %rel, bytes = file.bytes.len(), "stored public file");
        Ok(rel)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.root.join(path);
        tokio::fs::remove_file(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::Missing(path.to_owned())
            } else {
                Self::io(&full, e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_under_namespace_and_delete_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = PublicDiskStore::new(dir.path());
        let file = UploadedFile::new("widget.png", "image/png", vec![1, 2, 3]);

        let path = store.put("products", &file).await.unwrap();
        assert!(path.starts_with("products/"));
        assert!(path.ends_with(".png"));
        assert_eq!(tokio::fs::read(dir.path().join(&path)).await.unwrap(), vec![1, 2, 3]);

        store.delete(&path).await.unwrap();
        assert!(!dir.path().join(&path).exists());
    }

    #[tokio::test]
    async fn delete_of_unknown_path_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PublicDiskStore::new(dir.path());
        let err = store.delete("products/nothing.png").await.unwrap_err();
        assert!(matches!(err, StorageError::Missing(_)));
    }
}
