use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petcare_core::AppError;
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SchemaMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if matches!(
            self.0,
            AppError::Internal(_) | AppError::SchemaMissing(_)
        ) {
            error!(error = %self.0, "request failed");
        }

        let payload = Json(ErrorResponse {
            error: self.0.message().to_owned(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use petcare_core::AppError;
    use serde_json::Value;

    use super::ApiError;

    #[tokio::test]
    async fn errors_map_to_status_and_message_envelope() {
        let cases = [
            (AppError::Validation("Name is required".to_owned()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("Authentication required".to_owned()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("Your account is inactive".to_owned()), StatusCode::FORBIDDEN),
            (AppError::NotFound("Plan not found".to_owned()), StatusCode::NOT_FOUND),
            (AppError::Conflict("duplicate".to_owned()), StatusCode::CONFLICT),
            (
                AppError::SchemaMissing("run migrations".to_owned()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::Internal("boom".to_owned()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in cases {
            let message = error.message().to_owned();
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected_status);

            let body = to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap_or_else(|error| panic!("body should be readable: {error}"));
            let payload: Value = serde_json::from_slice(&body)
                .unwrap_or_else(|error| panic!("body should be json: {error}"));
            assert_eq!(payload, serde_json::json!({ "error": message }));
        }
    }
}
