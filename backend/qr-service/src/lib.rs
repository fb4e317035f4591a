//! QR Service
//!
//! Renders a URL as a QR-code PNG, stores it in an object-store bucket and
//! hands back the public location of the stored image.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use services::{ObjectStore, QrEncoder};

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};

/// Shared per-process state handed to every actix worker.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub encoder: Arc<QrEncoder>,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, encoder: Arc<QrEncoder>) -> Self {
        Self { store, encoder }
    }
}
