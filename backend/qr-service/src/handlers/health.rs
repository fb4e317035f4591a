/// Liveness and readiness probes
use actix_web::{web, HttpResponse};

use crate::models::ErrorBody;
use crate::AppState;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

pub async fn live() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Ready while the bucket answers; 503 with the store error otherwise
pub async fn ready(state: web::Data<AppState>) -> HttpResponse {
    match state.store.health_check().await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => {
            tracing::warn!(bucket = state.store.bucket(), error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(ErrorBody {
                detail: e.to_string(),
            })
        }
    }
}
