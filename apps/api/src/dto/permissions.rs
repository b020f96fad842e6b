use petcare_domain::PermissionSnapshot;
use serde::Serialize;
use ts_rs::TS;

/// The caller's role, status and granted permissions.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-set-response.ts"
)]
pub struct PermissionSetResponse {
    pub role: String,
    pub is_active: bool,
    pub permissions: Vec<String>,
}

impl From<PermissionSnapshot> for PermissionSetResponse {
    fn from(snapshot: PermissionSnapshot) -> Self {
        let permissions = if snapshot.is_active {
            snapshot
                .role
                .permissions()
                .iter()
                .map(|permission| permission.as_str().to_owned())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            role: snapshot.role.as_str().to_owned(),
            is_active: snapshot.is_active,
            permissions,
        }
    }
}

/// Envelope for `GET /api/me/permissions`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permissions-response.ts"
)]
pub struct PermissionsResponse {
    pub success: bool,
    pub permissions: PermissionSetResponse,
}

impl From<PermissionSnapshot> for PermissionsResponse {
    fn from(snapshot: PermissionSnapshot) -> Self {
        Self {
            success: true,
            permissions: PermissionSetResponse::from(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use petcare_domain::{PermissionSnapshot, Role};

    use super::PermissionSetResponse;

    #[test]
    fn inactive_callers_report_no_permissions() {
        let active = PermissionSetResponse::from(PermissionSnapshot {
            role: Role::Tutor,
            is_active: true,
        });
        assert_eq!(active.role, "TUTOR");
        assert!(active.permissions.iter().any(|permission| permission == "pet.read"));

        let inactive = PermissionSetResponse::from(PermissionSnapshot {
            role: Role::Admin,
            is_active: false,
        });
        assert!(!inactive.is_active);
        assert!(inactive.permissions.is_empty());
    }
}
