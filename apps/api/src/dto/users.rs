use petcare_application::ListRequest;
use petcare_core::AppResult;
use petcare_domain::{NewUser, Role, User, UserFilter};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{bool_filter, id_filter, list_request, non_blank, timestamp};

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub clinic_id: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(payload: CreateUserRequest) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            role: payload.role,
            is_active: payload.is_active,
            clinic_id: payload.clinic_id,
        }
    }
}

/// Incoming payload for activating or deactivating a user.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-status-request.ts"
)]
pub struct UpdateUserStatusRequest {
    pub is_active: bool,
}

/// API representation of a user.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub clinic_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_owned(),
            is_active: user.is_active,
            clinic_id: user.clinic_id.map(|clinic_id| clinic_id.to_string()),
            created_at: timestamp(user.timestamps.created_at),
            updated_at: timestamp(user.timestamps.updated_at),
        }
    }
}

/// Envelope for a single user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/single-user-response.ts"
)]
pub struct SingleUserResponse {
    pub success: bool,
    pub user: UserResponse,
}

impl From<User> for SingleUserResponse {
    fn from(user: User) -> Self {
        Self {
            success: true,
            user: UserResponse::from(user),
        }
    }
}

/// Query-string parameters for user listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub clinic_id: Option<String>,
    pub is_active: Option<String>,
}

impl UserListQuery {
    pub fn into_parts(self) -> AppResult<(ListRequest, UserFilter)> {
        let request = list_request(self.page, self.limit, self.search)?;
        let filter = UserFilter {
            role: non_blank(self.role)
                .map(|role| Role::parse(role.as_str()))
                .transpose()?,
            clinic_id: id_filter(self.clinic_id)?,
            is_active: bool_filter("isActive", self.is_active)?,
        };

        Ok((request, filter))
    }
}
