/// S3-backed object store
///
/// Works against AWS S3 or any S3-compatible service (MinIO, R2, ...).
/// A custom endpoint switches the client to path-style addressing.
use super::{public_object_url, BucketStatus, ObjectStore};
use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use bytes::Bytes;

/// Region where CreateBucket must be sent without a location constraint
const DEFAULT_REGION: &str = "us-east-1";

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
    public_base: String,
}

impl S3ObjectStore {
    /// Initialize an S3 client from storage configuration
    ///
    /// Explicit credentials are used when both halves are present;
    /// otherwise the default AWS credential chain applies.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "qr_service_s3",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("aws"),
            "S3 object store initialized"
        );

        Self::new(Client::from_conf(s3_config), config)
    }

    pub fn new(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            public_base: public_base_url(config),
        }
    }
}

/// Prefix of public object URLs for a bucket
pub fn public_base_url(config: &StorageConfig) -> String {
    if let Some(base) = &config.public_base_url {
        return base.trim_end_matches('/').to_string();
    }
    match &config.endpoint {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket, config.region
        ),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn ensure_bucket(&self) -> Result<BucketStatus> {
        let mut request = self.client.create_bucket().bucket(&self.bucket);
        if self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => Ok(BucketStatus::Created),
            Err(err) => {
                let already_exists = err.as_service_error().is_some_and(|e| {
                    e.is_bucket_already_owned_by_you() || e.is_bucket_already_exists()
                });
                if already_exists {
                    Ok(BucketStatus::AlreadyExists)
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to create bucket {}: {}",
                        self.bucket,
                        DisplayErrorContext(&err)
                    )))
                }
            }
        }
    }

    async fn health_check(&self) -> Result<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Bucket {} is not reachable: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                AppError::Storage(format!("S3 upload failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(self.object_url(key))
    }

    fn object_url(&self, key: &str) -> String {
        public_object_url(&self.public_base, key)
    }
}
