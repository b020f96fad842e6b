use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use petcare_core::AppError;
use tower_http::cors::CorsLayer;

/// Methods mounted by the router. Status changes use PUT, everything else is
/// read, create or delete.
const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

fn allowed_headers(identity_header: &HeaderName) -> [HeaderName; 3] {
    [CONTENT_TYPE, ACCEPT, identity_header.clone()]
}

/// Builds the CORS policy for the single trusted frontend origin.
pub(super) fn build_cors_layer(
    frontend_url: &str,
    identity_header: &HeaderName,
) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/')).map_err(|error| {
        AppError::Validation(format!("FRONTEND_URL is not a valid origin: {error}"))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers(identity_header)))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderName;
    use axum::http::header::{ACCEPT, CONTENT_TYPE};
    use petcare_core::AppError;

    use super::{allowed_headers, build_cors_layer};

    #[test]
    fn identity_header_is_allowed_cross_origin() {
        let identity_header = HeaderName::from_static("x-forwarded-user");

        let headers = allowed_headers(&identity_header);

        assert_eq!(headers, [CONTENT_TYPE, ACCEPT, identity_header]);
    }

    #[test]
    fn frontend_origin_builds_a_layer() {
        let identity_header = HeaderName::from_static("x-user-id");

        assert!(build_cors_layer("http://localhost:5173/", &identity_header).is_ok());
    }

    #[test]
    fn unusable_frontend_origin_is_a_validation_error() {
        let identity_header = HeaderName::from_static("x-user-id");

        let result = build_cors_layer("http://localhost:5173\n", &identity_header);

        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("FRONTEND_URL")));
    }
}
