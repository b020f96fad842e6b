use petcare_application::ListRequest;
use petcare_core::AppResult;
use petcare_domain::{NewPlan, Plan, PlanFilter, PlanStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{list_request, non_blank, timestamp};

/// Incoming payload for plan creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-plan-request.ts"
)]
pub struct CreatePlanRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in cents.
    #[ts(type = "number")]
    pub price: i64,
    pub care_period_days: i32,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<CreatePlanRequest> for NewPlan {
    fn from(payload: CreatePlanRequest) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            care_period_days: payload.care_period_days,
            status: payload.status,
        }
    }
}

/// API representation of a care plan.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/plan-response.ts"
)]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[ts(type = "number")]
    pub price: i64,
    pub care_period_days: i32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name,
            description: plan.description,
            price: plan.price,
            care_period_days: plan.care_period_days,
            status: plan.status.as_str().to_owned(),
            created_at: timestamp(plan.timestamps.created_at),
            updated_at: timestamp(plan.timestamps.updated_at),
        }
    }
}

/// Envelope for a single plan.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/single-plan-response.ts"
)]
pub struct SinglePlanResponse {
    pub success: bool,
    pub plan: PlanResponse,
}

impl From<Plan> for SinglePlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            success: true,
            plan: PlanResponse::from(plan),
        }
    }
}

/// Query-string parameters for plan listings.
#[derive(Debug, Default, Deserialize)]
pub struct PlanListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl PlanListQuery {
    pub fn into_parts(self) -> AppResult<(ListRequest, PlanFilter)> {
        let request = list_request(self.page, self.limit, self.search)?;
        let status = non_blank(self.status)
            .map(|status| PlanStatus::parse(status.as_str()))
            .transpose()?;

        Ok((request, PlanFilter { status }))
    }
}
