/// Service layer
///
/// - QR encoder: text to PNG
/// - Object storage: bucket bootstrap and uploads behind the `ObjectStore` trait
pub mod qr_encoder;
pub mod storage;

// Re-export commonly used types
pub use qr_encoder::{QrCodeOptions, QrEncoder, QrImage};
pub use storage::{
    build_store, ensure_bucket_ready, object_key_for_url, BucketStatus, InMemoryObjectStore,
    ObjectStore, S3ObjectStore,
};
