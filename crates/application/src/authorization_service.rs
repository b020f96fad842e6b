use petcare_core::{AppError, AppResult, UserIdentity};
use petcare_domain::{Permission, PermissionSnapshot};

use crate::PermissionResolver;

/// Application service gating actions on the caller's current role.
#[derive(Clone)]
pub struct AuthorizationService {
    resolver: PermissionResolver,
}

impl AuthorizationService {
    /// Creates a new authorization service from a permission resolver.
    #[must_use]
    pub fn new(resolver: PermissionResolver) -> Self {
        Self { resolver }
    }

    /// Ensures the caller is registered, active and granted the permission.
    ///
    /// Returns the snapshot the decision was made on so callers can apply
    /// record scoping without a second lookup.
    pub async fn require_permission(
        &self,
        actor: &UserIdentity,
        permission: Permission,
    ) -> AppResult<PermissionSnapshot> {
        let snapshot = self.snapshot_for(actor).await?;

        if !snapshot.is_active {
            return Err(AppError::Forbidden("Your account is inactive".to_owned()));
        }

        if !snapshot.role.grants(permission) {
            return Err(AppError::Forbidden(permission.denial_message().to_owned()));
        }

        Ok(snapshot)
    }

    /// Returns whether the caller currently holds the permission.
    pub async fn has_permission(
        &self,
        actor: &UserIdentity,
        permission: Permission,
    ) -> AppResult<bool> {
        match self.require_permission(actor, permission).await {
            Ok(_) => Ok(true),
            Err(AppError::Forbidden(_)) => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Resolves the caller's snapshot without checking any permission.
    pub async fn current_permissions(&self, actor: &UserIdentity) -> AppResult<PermissionSnapshot> {
        self.resolver.resolve_permissions(actor.subject()).await
    }

    async fn snapshot_for(&self, actor: &UserIdentity) -> AppResult<PermissionSnapshot> {
        match self.resolver.resolve_permissions(actor.subject()).await {
            Err(AppError::NotFound(_)) => Err(AppError::Unauthorized(
                "Your account is not registered".to_owned(),
            )),
            other => other,
        }
    }
}
