use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use petcare_core::UserIdentity;

use crate::dto::{
    CreatePetRequest, DeleteResponse, ListResponse, PetListQuery, PetResponse, SinglePetResponse,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_pets_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<PetListQuery>,
) -> ApiResult<Json<ListResponse<PetResponse>>> {
    let (request, filter) = query.into_parts()?;
    let page = state.pet_service.list(&user, request, filter).await?;

    Ok(Json(ListResponse::from_page(page)))
}

pub async fn create_pet_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreatePetRequest>,
) -> ApiResult<(StatusCode, Json<SinglePetResponse>)> {
    let pet = state
        .pet_service
        .create(&user, payload.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(SinglePetResponse::from(pet))))
}

pub async fn get_pet_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(pet_id): Path<String>,
) -> ApiResult<Json<SinglePetResponse>> {
    let pet = state.pet_service.get(&user, pet_id.as_str()).await?;

    Ok(Json(SinglePetResponse::from(pet)))
}

pub async fn delete_pet_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(pet_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.pet_service.delete(&user, pet_id.as_str()).await?;

    Ok(Json(DeleteResponse::ok()))
}
