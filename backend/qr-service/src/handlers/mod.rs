/// HTTP handlers
///
/// - QR: render a URL and publish the PNG
/// - Health: liveness/readiness probes
pub mod health;
pub mod qr;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::metrics;
use crate::models::ErrorBody;

pub use qr::generate_qr;

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorBody {
            detail: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(query_config)
        .route("/generate-qr/", web::post().to(generate_qr))
        .route("/generate-qr", web::post().to(generate_qr))
        .route("/metrics", web::get().to(metrics::metrics_handler))
        .route(
            "/api/v1/openapi.json",
            web::get().to(|| async {
                use utoipa::OpenApi;
                HttpResponse::Ok().json(crate::openapi::ApiDoc::openapi())
            }),
        )
        .service(
            web::scope("/api/v1/health")
                .route("", web::get().to(health::health))
                .route("/live", web::get().to(health::live))
                .route("/ready", web::get().to(health::ready)),
        );
}
