use axum::Json;
use axum::extract::{Extension, State};

use petcare_core::UserIdentity;

use crate::dto::PermissionsResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<PermissionsResponse>> {
    let snapshot = state.authorization_service.current_permissions(&user).await?;

    Ok(Json(PermissionsResponse::from(snapshot)))
}
