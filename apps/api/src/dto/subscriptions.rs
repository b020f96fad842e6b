use petcare_application::ListRequest;
use petcare_core::{AppError, AppResult};
use petcare_domain::{NewSubscription, Subscription, SubscriptionFilter, SubscriptionStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{id_filter, list_request, non_blank, optional_date, parse_date, timestamp};

/// Incoming payload for subscription creation.
///
/// Dates are calendar dates formatted as `YYYY-MM-DD`.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-subscription-request.ts"
)]
pub struct CreateSubscriptionRequest {
    pub pet_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub status: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl TryFrom<CreateSubscriptionRequest> for NewSubscription {
    type Error = AppError;

    fn try_from(payload: CreateSubscriptionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_date("Start date", payload.start_date.as_str())?,
            end_date: optional_date("End date", payload.end_date)?,
            pet_id: payload.pet_id,
            plan_id: payload.plan_id,
            status: payload.status,
        })
    }
}

/// API representation of a pet's plan subscription.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/subscription-response.ts"
)]
pub struct SubscriptionResponse {
    pub id: String,
    pub pet_id: String,
    pub plan_id: String,
    pub status: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            pet_id: subscription.pet_id.to_string(),
            plan_id: subscription.plan_id.to_string(),
            status: subscription.status.as_str().to_owned(),
            start_date: subscription.start_date.to_string(),
            end_date: subscription.end_date.map(|date| date.to_string()),
            created_at: timestamp(subscription.timestamps.created_at),
            updated_at: timestamp(subscription.timestamps.updated_at),
        }
    }
}

/// Envelope for a single subscription.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/single-subscription-response.ts"
)]
pub struct SingleSubscriptionResponse {
    pub success: bool,
    pub subscription: SubscriptionResponse,
}

impl From<Subscription> for SingleSubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            success: true,
            subscription: SubscriptionResponse::from(subscription),
        }
    }
}

/// Query-string parameters for subscription listings.
///
/// `search` is accepted for symmetry but subscriptions have no searchable text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub pet_id: Option<String>,
    pub plan_id: Option<String>,
    pub status: Option<String>,
}

impl SubscriptionListQuery {
    pub fn into_parts(self) -> AppResult<(ListRequest, SubscriptionFilter)> {
        let request = list_request(self.page, self.limit, self.search)?;
        let filter = SubscriptionFilter {
            pet_id: id_filter(self.pet_id)?,
            plan_id: id_filter(self.plan_id)?,
            status: non_blank(self.status)
                .map(|status| SubscriptionStatus::parse(status.as_str()))
                .transpose()?,
        };

        Ok((request, filter))
    }
}
