/// HTTP middleware
///
/// - CORS: handled by actix_cors::Cors
/// - Request logging: actix_web::middleware::Logger, wired in main
use actix_cors::Cors;

/// Build the CORS policy for the configured origins
///
/// `*` allows any origin. Methods and headers are unrestricted.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
