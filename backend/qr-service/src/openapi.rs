/// OpenAPI documentation for QR Service
use utoipa::OpenApi;

use crate::models::{ErrorBody, QrCodeResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Service API",
        version = "1.0.0",
        description = "Renders URLs as QR-code PNGs and stores them in object storage, returning the public URL of each image.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    paths(crate::handlers::qr::generate_qr),
    components(schemas(QrCodeResponse, ErrorBody)),
    tags(
        (name = "qr", description = "QR code generation"),
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_path_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/generate-qr/"));
        assert_eq!(doc.info.title, "QR Service API");
    }
}
