/// Object storage for rendered QR codes
///
/// `ObjectStore` is the seam between the HTTP layer and the backing bucket.
/// `S3ObjectStore` talks to AWS S3 or any S3-compatible endpoint;
/// `InMemoryObjectStore` keeps objects in process for tests and local runs.
use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

pub mod memory;
pub mod s3;

pub use memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;

/// Prefix shared by every stored QR image
pub const QR_KEY_PREFIX: &str = "qr_codes/";

/// Content type of every stored QR image
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Characters that must be percent-encoded in a public object URL
const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Outcome of a bucket bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Created,
    AlreadyExists,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket objects are written to
    fn bucket(&self) -> &str;

    /// Create the bucket. An existing bucket is reported, not treated as failure.
    async fn ensure_bucket(&self) -> Result<BucketStatus>;

    /// Check that the bucket is reachable, without modifying it
    async fn health_check(&self) -> Result<()>;

    /// Upload `data` under `key`, replacing any existing object, and return
    /// the object's public URL.
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<String>;

    /// Public URL of `key`, without touching the network
    fn object_url(&self, key: &str) -> String;
}

/// Derive the storage key for a URL: `qr_codes/<url without scheme>.png`
///
/// Everything up to and including the last `//` is dropped, so
/// `https://example.com/a` and `example.com/a` share a key.
pub fn object_key_for_url(url: &str) -> String {
    let path = url.rsplit("//").next().unwrap_or(url);
    format!("{QR_KEY_PREFIX}{path}.png")
}

/// Join a base URL and an object key, percent-encoding the key
pub fn public_object_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(key, PATH_SET)
    )
}

/// Build the object store selected by configuration
pub async fn build_store(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config.backend {
        StorageBackend::S3 => Arc::new(S3ObjectStore::from_config(config).await),
        StorageBackend::Memory => {
            let base = config
                .public_base_url
                .clone()
                .unwrap_or_else(|| format!("memory://{}", config.bucket));
            Arc::new(InMemoryObjectStore::new(config.bucket.clone(), base))
        }
    }
}

/// Make sure the destination bucket exists before serving traffic
///
/// An already-existing bucket is success; any other failure is returned
/// so startup can abort.
pub async fn ensure_bucket_ready(store: &dyn ObjectStore) -> Result<BucketStatus> {
    match store.ensure_bucket().await {
        Ok(BucketStatus::Created) => {
            tracing::info!(bucket = store.bucket(), "Created storage bucket");
            Ok(BucketStatus::Created)
        }
        Ok(BucketStatus::AlreadyExists) => {
            tracing::info!(bucket = store.bucket(), "Storage bucket already exists");
            Ok(BucketStatus::AlreadyExists)
        }
        Err(e) => {
            tracing::error!(bucket = store.bucket(), error = %e, "Failed to create storage bucket");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_key_strips_scheme() {
        assert_eq!(
            object_key_for_url("https://example.com/page"),
            "qr_codes/example.com/page.png"
        );
        assert_eq!(
            object_key_for_url("http://example.com"),
            "qr_codes/example.com.png"
        );
    }

    #[test]
    fn test_key_without_scheme_is_used_whole() {
        assert_eq!(object_key_for_url("example.com"), "qr_codes/example.com.png");
        assert_eq!(object_key_for_url("mailto:a@b.c"), "qr_codes/mailto:a@b.c.png");
    }

    #[test]
    fn test_key_uses_text_after_last_double_slash() {
        assert_eq!(
            object_key_for_url("https://example.com/a//b"),
            "qr_codes/b.png"
        );
    }

    #[test]
    fn test_key_is_deterministic() {
        let url = "https://example.com/landing?ref=qr";
        assert_eq!(object_key_for_url(url), object_key_for_url(url));
    }

    #[test]
    fn test_public_url_encodes_key_segments() {
        assert_eq!(
            public_object_url("https://cdn.example/", "qr_codes/example.com/a b?x=1.png"),
            "https://cdn.example/qr_codes/example.com/a%20b%3Fx%3D1.png"
        );
    }

    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        fn bucket(&self) -> &str {
            "broken"
        }

        async fn ensure_bucket(&self) -> Result<BucketStatus> {
            Err(AppError::Storage("AccessDenied".into()))
        }

        async fn health_check(&self) -> Result<()> {
            Err(AppError::Storage("AccessDenied".into()))
        }

        async fn put_object(&self, _key: &str, _data: Bytes, _ct: &str) -> Result<String> {
            Err(AppError::Storage("AccessDenied".into()))
        }

        fn object_url(&self, key: &str) -> String {
            key.to_string()
        }
    }

    #[tokio::test]
    async fn test_existing_bucket_is_ready() {
        let store = InMemoryObjectStore::new("qrcodes", "memory://qrcodes");

        assert_eq!(
            ensure_bucket_ready(&store).await.unwrap(),
            BucketStatus::Created
        );
        assert_eq!(
            ensure_bucket_ready(&store).await.unwrap(),
            BucketStatus::AlreadyExists
        );
    }

    #[tokio::test]
    async fn test_other_bucket_errors_abort() {
        let err = ensure_bucket_ready(&FailingStore).await.unwrap_err();
        assert_eq!(err.to_string(), "AccessDenied");
    }

    #[tokio::test]
    async fn test_build_memory_store() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            bucket: "codes".into(),
            region: "us-east-1".into(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            public_base_url: None,
        };

        let store = build_store(&config).await;
        assert_eq!(store.bucket(), "codes");
        assert_eq!(
            store.object_url("qr_codes/x.png"),
            "memory://codes/qr_codes/x.png"
        );
    }
}
