use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use petcare_core::{AppError, AppResult, RecordId, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers(), &state.identity_header)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method())
        && !is_same_origin(request.headers(), state.frontend_url.as_str())
    {
        return Err(AppError::Forbidden("Origin validation failed".to_owned()).into());
    }

    Ok(next.run(request).await)
}

/// Reads the caller identity forwarded by the identity provider.
fn identity_from_headers(
    headers: &HeaderMap,
    identity_header: &HeaderName,
) -> AppResult<UserIdentity> {
    let subject = headers
        .get(identity_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_owned()))?;

    Ok(UserIdentity::new(RecordId::new(subject)?))
}

fn is_same_origin(headers: &HeaderMap, allowed_origin: &str) -> bool {
    if headers.get("sec-fetch-site") == Some(&HeaderValue::from_static("cross-site")) {
        return false;
    }

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    origin == allowed_origin || referer.starts_with(&format!("{allowed_origin}/"))
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, header};
    use petcare_core::AppError;

    use super::{identity_from_headers, is_same_origin, is_state_changing_method};

    const FRONTEND: &str = "http://localhost:3000";

    fn headers(entries: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for &(name, value) in entries {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        headers
    }

    #[test]
    fn identity_header_is_required() {
        let identity_header = HeaderName::from_static("x-user-id");

        let missing = identity_from_headers(&HeaderMap::new(), &identity_header);
        assert!(matches!(missing, Err(AppError::Unauthorized(message))
            if message == "Authentication required"));

        let blank = identity_from_headers(&headers(&[("x-user-id", "  ")]), &identity_header);
        assert!(matches!(blank, Err(AppError::Unauthorized(_))));

        let present = identity_from_headers(
            &headers(&[("x-user-id", "0b9a3c3e-5d43-4f3a-9d0e-3f0f4d8f7c11")]),
            &identity_header,
        );
        assert_eq!(
            present.ok().map(|identity| identity.subject().as_str().to_owned()),
            Some("0b9a3c3e-5d43-4f3a-9d0e-3f0f4d8f7c11".to_owned())
        );
    }

    #[test]
    fn mutations_require_frontend_origin() {
        assert!(is_same_origin(&headers(&[("origin", FRONTEND)]), FRONTEND));
        assert!(is_same_origin(
            &headers(&[("referer", "http://localhost:3000/pets")]),
            FRONTEND
        ));
        assert!(!is_same_origin(
            &headers(&[("origin", "http://evil.test")]),
            FRONTEND
        ));
        assert!(!is_same_origin(
            &headers(&[("referer", "http://localhost:3000.evil.test/")]),
            FRONTEND
        ));
        assert!(!is_same_origin(&HeaderMap::new(), FRONTEND));

        let mut cross_site = headers(&[("sec-fetch-site", "cross-site")]);
        cross_site.insert(header::ORIGIN, HeaderValue::from_static(FRONTEND));
        assert!(!is_same_origin(&cross_site, FRONTEND));
    }

    #[test]
    fn only_mutating_methods_are_checked() {
        assert!(is_state_changing_method(&Method::POST));
        assert!(is_state_changing_method(&Method::PUT));
        assert!(is_state_changing_method(&Method::DELETE));
        assert!(!is_state_changing_method(&Method::GET));
        assert!(!is_state_changing_method(&Method::OPTIONS));
    }
}
