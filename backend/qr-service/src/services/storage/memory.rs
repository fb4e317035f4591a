/// In-process object store
///
/// Holds uploaded objects in a map. Used by the test suite and by
/// `QR_STORAGE_BACKEND=memory` for running without a bucket.
use super::{public_object_url, BucketStatus, ObjectStore};
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A stored object
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

pub struct InMemoryObjectStore {
    bucket: String,
    base_url: String,
    created: AtomicBool,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new(bucket: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            base_url: base_url.into(),
            created: AtomicBool::new(false),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn ensure_bucket(&self) -> Result<BucketStatus> {
        if self.created.swap(true, Ordering::SeqCst) {
            Ok(BucketStatus::AlreadyExists)
        } else {
            Ok(BucketStatus::Created)
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<String> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.object_url(key))
    }

    fn object_url(&self, key: &str) -> String {
        public_object_url(&self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let store = InMemoryObjectStore::new("qrcodes", "https://cdn.example");

        let first = store
            .put_object("qr_codes/a.png", Bytes::from_static(b"one"), "image/png")
            .await
            .unwrap();
        let second = store
            .put_object("qr_codes/a.png", Bytes::from_static(b"two"), "image/png")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first, "https://cdn.example/qr_codes/a.png");
        assert_eq!(store.len().await, 1);

        let stored = store.get("qr_codes/a.png").await.unwrap();
        assert_eq!(stored.data, Bytes::from_static(b"two"));
        assert_eq!(stored.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = InMemoryObjectStore::new("qrcodes", "memory://qrcodes");
        assert!(store.get("qr_codes/missing.png").await.is_none());
        assert!(store.is_empty().await);
    }
}
