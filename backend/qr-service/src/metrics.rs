/// Prometheus metrics for qr-service
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry, CounterVec, Encoder,
    Histogram, Registry, TextEncoder,
};

lazy_static! {
    /// Service registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Generation requests (labels: outcome=success|encoding_error|upload_error)
    pub static ref QR_CODES_GENERATED_TOTAL: CounterVec = register_counter_vec_with_registry!(
        "qr_codes_generated_total",
        "Total number of QR code generation requests",
        &["outcome"],
        REGISTRY
    )
    .expect("Failed to register metric");

    /// Object store upload latency
    pub static ref QR_UPLOAD_DURATION_SECONDS: Histogram = register_histogram_with_registry!(
        "qr_upload_duration_seconds",
        "Time spent uploading QR images to object storage",
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        REGISTRY
    )
    .expect("Failed to register metric");

    /// Encoded PNG size
    pub static ref QR_IMAGE_SIZE_BYTES: Histogram = register_histogram_with_registry!(
        "qr_image_size_bytes",
        "Size distribution of rendered QR PNGs (bytes)",
        vec![256.0, 512.0, 1024.0, 2048.0, 4096.0, 8192.0, 16384.0],
        REGISTRY
    )
    .expect("Failed to register metric");
}

pub fn record_outcome(outcome: &str) {
    QR_CODES_GENERATED_TOTAL.with_label_values(&[outcome]).inc();
}

/// Render all registered metrics in the text exposition format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// `GET /metrics`
pub async fn metrics_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(gather_metrics())
}
