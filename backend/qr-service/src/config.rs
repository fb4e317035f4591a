/// Configuration management for qr-service
///
/// Loads configuration from environment variables with sensible defaults.
/// Read once at startup.
use crate::error::{AppError, Result};
use qrcode::EcLevel;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::services::QrCodeOptions;

/// Largest accepted `QR_BOX_SIZE`, in pixels per module
pub const MAX_BOX_SIZE: u32 = 100;
/// Largest accepted `QR_BORDER`, in modules
pub const MAX_BORDER: u32 = 64;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub qr: QrConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Which object store implementation backs the service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::Config(format!(
                "Unknown storage backend '{other}' (expected 's3' or 'memory')"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// S3-compatible endpoint (MinIO, R2, ...). Enables path-style addressing.
    pub endpoint: Option<String>,
    /// Overrides the prefix of returned object URLs (CDN domain, etc.)
    pub public_base_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct QrConfig {
    pub box_size: u32,
    pub border: u32,
}

impl QrConfig {
    pub fn options(&self) -> QrCodeOptions {
        QrCodeOptions {
            box_size: self.box_size,
            border: self.border,
            ec_level: EcLevel::L,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = QrCodeOptions::default();

        let backend = match var("QR_STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::S3,
        };

        Ok(Config {
            app: AppConfig {
                host: var("QR_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: var("QR_SERVICE_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(8000),
                env: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|| "http://localhost:3000".to_string()),
                ),
            },
            storage: StorageConfig {
                backend,
                bucket: var("QR_BUCKET").unwrap_or_else(|| "qrcodes".to_string()),
                region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: var("AWS_ACCESS_KEY_ID"),
                secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
                endpoint: var("S3_ENDPOINT"),
                public_base_url: var("QR_PUBLIC_BASE_URL"),
            },
            qr: QrConfig {
                box_size: bounded(
                    "QR_BOX_SIZE",
                    var("QR_BOX_SIZE"),
                    1..=MAX_BOX_SIZE,
                    defaults.box_size,
                )?,
                border: bounded("QR_BORDER", var("QR_BORDER"), 0..=MAX_BORDER, defaults.border)?,
            },
        })
    }
}

/// Parse a numeric variable. Unparseable input falls back to `default`;
/// a number outside `range` is a configuration error.
fn bounded(
    key: &str,
    raw: Option<String>,
    range: RangeInclusive<u32>,
    default: u32,
) -> Result<u32> {
    match raw.and_then(|v| v.trim().parse::<u32>().ok()) {
        None => Ok(default),
        Some(value) if range.contains(&value) => Ok(value),
        Some(value) => Err(AppError::Config(format!(
            "{key}={value} is out of range ({}..={})",
            range.start(),
            range.end()
        ))),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
