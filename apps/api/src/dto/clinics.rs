use petcare_application::ListRequest;
use petcare_core::AppResult;
use petcare_domain::{Clinic, ClinicFilter, NewClinic};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{list_request, non_blank, timestamp};

/// Incoming payload for clinic creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-clinic-request.ts"
)]
pub struct CreateClinicRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<CreateClinicRequest> for NewClinic {
    fn from(payload: CreateClinicRequest) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            city: payload.city,
            state: payload.state,
        }
    }
}

/// API representation of a clinic.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/clinic-response.ts"
)]
pub struct ClinicResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Clinic> for ClinicResponse {
    fn from(clinic: Clinic) -> Self {
        Self {
            id: clinic.id.to_string(),
            name: clinic.name,
            email: clinic.email,
            phone: clinic.phone,
            address: clinic.address,
            city: clinic.city,
            state: clinic.state,
            created_at: timestamp(clinic.timestamps.created_at),
            updated_at: timestamp(clinic.timestamps.updated_at),
        }
    }
}

/// Envelope for a single clinic.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/single-clinic-response.ts"
)]
pub struct SingleClinicResponse {
    pub success: bool,
    pub clinic: ClinicResponse,
}

impl From<Clinic> for SingleClinicResponse {
    fn from(clinic: Clinic) -> Self {
        Self {
            success: true,
            clinic: ClinicResponse::from(clinic),
        }
    }
}

/// Query-string parameters for clinic listings.
#[derive(Debug, Default, Deserialize)]
pub struct ClinicListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub city: Option<String>,
}

impl ClinicListQuery {
    pub fn into_parts(self) -> AppResult<(ListRequest, ClinicFilter)> {
        let request = list_request(self.page, self.limit, self.search)?;
        Ok((
            request,
            ClinicFilter {
                city: non_blank(self.city),
            },
        ))
    }
}
