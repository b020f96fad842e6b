use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use petcare_core::UserIdentity;

use crate::dto::{
    CreateSubscriptionRequest, DeleteResponse, ListResponse, SingleSubscriptionResponse,
    SubscriptionListQuery, SubscriptionResponse,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_subscriptions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<SubscriptionListQuery>,
) -> ApiResult<Json<ListResponse<SubscriptionResponse>>> {
    let (request, filter) = query.into_parts()?;
    let page = state
        .subscription_service
        .list(&user, request, filter)
        .await?;

    Ok(Json(ListResponse::from_page(page)))
}

pub async fn create_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreateSubscriptionRequest>,
) -> ApiResult<(StatusCode, Json<SingleSubscriptionResponse>)> {
    let subscription = state
        .subscription_service
        .create(&user, payload.try_into()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SingleSubscriptionResponse::from(subscription)),
    ))
}

pub async fn get_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(subscription_id): Path<String>,
) -> ApiResult<Json<SingleSubscriptionResponse>> {
    let subscription = state
        .subscription_service
        .get(&user, subscription_id.as_str())
        .await?;

    Ok(Json(SingleSubscriptionResponse::from(subscription)))
}

pub async fn delete_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(subscription_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state
        .subscription_service
        .delete(&user, subscription_id.as_str())
        .await?;

    Ok(Json(DeleteResponse::ok()))
}
