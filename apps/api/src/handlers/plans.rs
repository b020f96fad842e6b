use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use petcare_core::UserIdentity;

use crate::dto::{
    CreatePlanRequest, DeleteResponse, ListResponse, PlanListQuery, PlanResponse,
    SinglePlanResponse,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_plans_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<PlanListQuery>,
) -> ApiResult<Json<ListResponse<PlanResponse>>> {
    let (request, filter) = query.into_parts()?;
    let page = state.plan_service.list(&user, request, filter).await?;

    Ok(Json(ListResponse::from_page(page)))
}

pub async fn create_plan_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<SinglePlanResponse>)> {
    let plan = state.plan_service.create(&user, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(SinglePlanResponse::from(plan))))
}

pub async fn get_plan_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(plan_id): Path<String>,
) -> ApiResult<Json<SinglePlanResponse>> {
    let plan = state.plan_service.get(&user, plan_id.as_str()).await?;

    Ok(Json(SinglePlanResponse::from(plan)))
}

pub async fn delete_plan_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(plan_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.plan_service.delete(&user, plan_id.as_str()).await?;

    Ok(Json(DeleteResponse::ok()))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Path, Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    use super::{create_plan_handler, delete_plan_handler, get_plan_handler, list_plans_handler};
    use crate::dto::{CreatePlanRequest, PlanListQuery};
    use crate::extract::ApiJson;
    use crate::handlers::test_support::{TestApp, response_json};

    fn basic_plan() -> CreatePlanRequest {
        CreatePlanRequest {
            name: "Basic".to_owned(),
            description: None,
            price: 1000,
            care_period_days: 30,
            status: None,
        }
    }

    #[tokio::test]
    async fn plan_lifecycle_uses_success_envelopes() {
        let app = TestApp::new();

        let created = create_plan_handler(
            State(app.state.clone()),
            Extension(app.admin.clone()),
            ApiJson(basic_plan()),
        )
        .await
        .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = response_json(created).await;
        assert_eq!(created["success"], json!(true));
        assert_eq!(created["plan"]["status"], json!("ATIVO"));
        assert_eq!(created["plan"]["carePeriodDays"], json!(30));
        assert_eq!(created["plan"]["createdAt"], created["plan"]["updatedAt"]);
        let plan_id = created["plan"]["id"].as_str().unwrap_or_default().to_owned();

        let listed = list_plans_handler(
            State(app.state.clone()),
            Extension(app.vet.clone()),
            Query(PlanListQuery::default()),
        )
        .await
        .into_response();
        let listed = response_json(listed).await;
        assert_eq!(
            (
                &listed["total"],
                &listed["page"],
                &listed["limit"],
                &listed["totalPages"]
            ),
            (&json!(1), &json!(1), &json!(10), &json!(1))
        );

        let deleted = delete_plan_handler(
            State(app.state.clone()),
            Extension(app.admin.clone()),
            Path(plan_id.clone()),
        )
        .await
        .into_response();
        assert_eq!(deleted.status(), StatusCode::OK);
        assert_eq!(response_json(deleted).await, json!({ "success": true }));

        let missing = get_plan_handler(
            State(app.state.clone()),
            Extension(app.admin.clone()),
            Path(plan_id),
        )
        .await
        .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response_json(missing).await,
            json!({ "error": "Plan not found" })
        );
    }

    #[tokio::test]
    async fn out_of_range_limit_is_rejected() {
        let app = TestApp::new();
        let response = list_plans_handler(
            State(app.state.clone()),
            Extension(app.admin.clone()),
            Query(PlanListQuery {
                limit: Some("500".to_owned()),
                ..PlanListQuery::default()
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn veterinarians_cannot_create_plans() {
        let app = TestApp::new();
        let response = create_plan_handler(
            State(app.state.clone()),
            Extension(app.vet.clone()),
            ApiJson(basic_plan()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response_json(response).await,
            json!({ "error": "You do not have permission to manage plans" })
        );
    }
}
