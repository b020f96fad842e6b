use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use petcare_core::AppError;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API error envelope.
///
/// Malformed bodies, missing fields and wrong content types are reported as
/// validation errors.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::from(AppError::Validation(rejection.body_text())))?;

        Ok(Self(value))
    }
}
