//! In-memory file store.
//!
//! Intended for tests/dev. Records every call so tests can assert both
//! contents and call ordering (e.g. old image deleted before the new one is
//! stored).

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{FileStore, StorageError, UploadedFile};

/// One observed store call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Put(String),
    Delete(String),
}

#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
    ops: RwLock<Vec<StoreOp>>,
    fail_deletes: AtomicBool,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `delete` fail, for exercising best-effort paths.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.read().map(|f| f.contains_key(path)).unwrap_or(false)
    }

    pub fn file_count(&self) -> usize {
        self.files.read().map(|f| f.len()).unwrap_or(0)
    }

    /// All calls observed so far, oldest first.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.read().map(|ops| ops.clone()).unwrap_or_default()
    }

    fn record(&self, op: StoreOp) -> Result<(), StorageError> {
        self.ops
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(op);
        Ok(())
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn put(&self, namespace: &str, file: &UploadedFile) -> Result<String, StorageError> {
        let name = match file.extension() {
            Some(ext) => format!("{}.{ext}", Uuid::now_v7()),
            None => Uuid::now_v7().to_string(),
        };
        let path = format!("{namespace}/{name}");

        self.record(StoreOp::Put(path.clone()))?;
        self.files
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .insert(path.clone(), file.bytes.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.record(StoreOp::Delete(path.to_owned()))?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Missing(path.to_owned()));
        }
        let removed = self
            .files
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .remove(path);
        match removed {
            Some(_) => Ok(()),
            None => Err(StorageError::Missing(path.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_delete_records_ops_in_order() {
        let store = InMemoryFileStore::new();
        let file = UploadedFile::new("a.gif", "image/gif", vec![7]);

        let path = store.put("products", &file).await.unwrap();
        assert!(store.contains(&path));

        store.delete(&path).await.unwrap();
        assert!(!store.contains(&path));
        assert_eq!(
            store.ops(),
            vec![StoreOp::Put(path.clone()), StoreOp::Delete(path)]
        );
    }

    #[tokio::test]
    async fn forced_delete_failure_still_records_the_attempt() {
        let store = InMemoryFileStore::new();
        let file = UploadedFile::new("a.png", "image/png", vec![1]);
        let path = store.put("products", &file).await.unwrap();

        store.fail_deletes(true);
        assert!(store.delete(&path).await.is_err());
        assert!(store.contains(&path));
        assert_eq!(store.ops().len(), 2);
    }
}
