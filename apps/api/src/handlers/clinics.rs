use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use petcare_core::UserIdentity;

use crate::dto::{
    ClinicListQuery, ClinicResponse, CreateClinicRequest, DeleteResponse, ListResponse,
    SingleClinicResponse,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_clinics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ClinicListQuery>,
) -> ApiResult<Json<ListResponse<ClinicResponse>>> {
    let (request, filter) = query.into_parts()?;
    let page = state.clinic_service.list(&user, request, filter).await?;

    Ok(Json(ListResponse::from_page(page)))
}

pub async fn create_clinic_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreateClinicRequest>,
) -> ApiResult<(StatusCode, Json<SingleClinicResponse>)> {
    let clinic = state.clinic_service.create(&user, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(SingleClinicResponse::from(clinic))))
}

pub async fn get_clinic_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(clinic_id): Path<String>,
) -> ApiResult<Json<SingleClinicResponse>> {
    let clinic = state.clinic_service.get(&user, clinic_id.as_str()).await?;

    Ok(Json(SingleClinicResponse::from(clinic)))
}

pub async fn delete_clinic_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(clinic_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.clinic_service.delete(&user, clinic_id.as_str()).await?;

    Ok(Json(DeleteResponse::ok()))
}
