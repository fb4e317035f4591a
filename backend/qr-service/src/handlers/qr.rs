/// QR generation handler
use actix_web::{web, HttpResponse};
use std::time::Instant;

use crate::error::Result;
use crate::metrics;
use crate::models::{GenerateQrQuery, QrCodeResponse};
use crate::services::storage::{object_key_for_url, PNG_CONTENT_TYPE};
use crate::AppState;

/// Render a URL as a QR code and publish it to object storage
///
/// The input is not validated: any string is encoded as given.
#[utoipa::path(
    post,
    path = "/generate-qr/",
    tag = "qr",
    params(GenerateQrQuery),
    responses(
        (status = 200, description = "QR code stored", body = QrCodeResponse),
        (status = 400, description = "Missing url parameter", body = crate::models::ErrorBody),
        (status = 500, description = "Encoding or upload failed", body = crate::models::ErrorBody),
    )
)]
pub async fn generate_qr(
    state: web::Data<AppState>,
    query: web::Query<GenerateQrQuery>,
) -> Result<HttpResponse> {
    let GenerateQrQuery { url } = query.into_inner();
    let key = object_key_for_url(&url);

    let image = match state.encoder.clone().render_async(url).await {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(%key, error = %e, "QR encoding failed");
            metrics::record_outcome("encoding_error");
            return Err(e);
        }
    };
    metrics::QR_IMAGE_SIZE_BYTES.observe(image.data.len() as f64);

    let bytes = image.data.len();
    let started = Instant::now();
    let upload = state.store.put_object(&key, image.data, PNG_CONTENT_TYPE).await;
    metrics::QR_UPLOAD_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

    let qr_code_url = match upload {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(%key, error = %e, "QR upload failed");
            metrics::record_outcome("upload_error");
            return Err(e);
        }
    };

    tracing::info!(%key, bytes, "QR code stored");
    metrics::record_outcome("success");

    Ok(HttpResponse::Ok().json(QrCodeResponse { qr_code_url }))
}
