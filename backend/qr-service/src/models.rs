/// Request and response bodies for the HTTP API
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string of `POST /generate-qr/`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQrQuery {
    /// Text to encode. Any string is accepted.
    pub url: String,
}

/// Successful generation result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QrCodeResponse {
    /// Public URL of the stored PNG
    pub qr_code_url: String,
}

/// Body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}
