use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use petcare_core::UserIdentity;

use crate::dto::{
    CreateUserRequest, DeleteResponse, ListResponse, SingleUserResponse,
    UpdateUserStatusRequest, UserListQuery, UserResponse,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<ListResponse<UserResponse>>> {
    let (request, filter) = query.into_parts()?;
    let page = state.user_service.list(&user, request, filter).await?;

    Ok(Json(ListResponse::from_page(page)))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<SingleUserResponse>)> {
    let created = state.user_service.create(&user, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(SingleUserResponse::from(created))))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<SingleUserResponse>> {
    let found = state.user_service.get(&user, user_id.as_str()).await?;

    Ok(Json(SingleUserResponse::from(found)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.user_service.delete(&user, user_id.as_str()).await?;

    Ok(Json(DeleteResponse::ok()))
}

pub async fn update_user_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateUserStatusRequest>,
) -> ApiResult<Json<SingleUserResponse>> {
    let updated = state
        .user_account_service
        .set_active(&user, user_id.as_str(), payload.is_active)
        .await?;

    Ok(Json(SingleUserResponse::from(updated)))
}
