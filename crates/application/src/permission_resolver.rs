use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::PermissionSnapshot;

/// Repository port for identity lookups.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Reads the current role and active flag of an identity.
    async fn find_permission_snapshot(
        &self,
        identity_id: &RecordId,
    ) -> AppResult<Option<PermissionSnapshot>>;

    /// Sets the active flag of an identity; returns the number of rows updated.
    async fn update_active_flag(
        &self,
        identity_id: &RecordId,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> AppResult<u64>;
}

/// Resolves the permission snapshot of an identity.
///
/// Every call re-reads storage, so role changes and deactivations apply to
/// the very next check.
#[derive(Clone)]
pub struct PermissionResolver {
    repository: Arc<dyn IdentityRepository>,
}

impl PermissionResolver {
    /// Creates a resolver over an identity repository.
    #[must_use]
    pub fn new(repository: Arc<dyn IdentityRepository>) -> Self {
        Self { repository }
    }

    /// Returns `{ role, is_active }` for the identity, or `NotFound`.
    ///
    /// Inactive identities still resolve; enforcing the flag is up to the caller.
    pub async fn resolve_permissions(&self, identity_id: &RecordId) -> AppResult<PermissionSnapshot> {
        self.repository
            .find_permission_snapshot(identity_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use petcare_core::{AppError, AppResult, RecordId};
    use petcare_domain::{PermissionSnapshot, Role};
    use tokio::sync::Mutex;

    use super::{IdentityRepository, PermissionResolver};

    #[derive(Default)]
    struct FakeIdentityRepository {
        snapshots: Mutex<HashMap<RecordId, PermissionSnapshot>>,
        lookups: Mutex<usize>,
    }

    #[async_trait]
    impl IdentityRepository for FakeIdentityRepository {
        async fn find_permission_snapshot(
            &self,
            identity_id: &RecordId,
        ) -> AppResult<Option<PermissionSnapshot>> {
            *self.lookups.lock().await += 1;
            Ok(self.snapshots.lock().await.get(identity_id).copied())
        }

        async fn update_active_flag(
            &self,
            identity_id: &RecordId,
            is_active: bool,
            _updated_at: DateTime<Utc>,
        ) -> AppResult<u64> {
            let mut snapshots = self.snapshots.lock().await;
            Ok(snapshots
                .get_mut(identity_id)
                .map(|snapshot| {
                    snapshot.is_active = is_active;
                    1
                })
                .unwrap_or(0))
        }
    }

    fn identity(value: &str) -> RecordId {
        RecordId::new(value).unwrap_or_else(|error| panic!("valid id: {error}"))
    }

    #[tokio::test]
    async fn unknown_identity_is_not_found() {
        let resolver = PermissionResolver::new(Arc::new(FakeIdentityRepository::default()));

        let result = resolver.resolve_permissions(&identity("ghost")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn deactivated_identity_still_resolves() {
        let repository = Arc::new(FakeIdentityRepository::default());
        repository.snapshots.lock().await.insert(
            identity("bia"),
            PermissionSnapshot {
                role: Role::Receptionist,
                is_active: false,
            },
        );
        let resolver = PermissionResolver::new(repository);

        let snapshot = resolver.resolve_permissions(&identity("bia")).await;
        assert_eq!(
            snapshot.ok(),
            Some(PermissionSnapshot {
                role: Role::Receptionist,
                is_active: false,
            })
        );
    }

    #[tokio::test]
    async fn every_resolution_reads_current_state() {
        let repository = Arc::new(FakeIdentityRepository::default());
        repository.snapshots.lock().await.insert(
            identity("ana"),
            PermissionSnapshot {
                role: Role::Admin,
                is_active: true,
            },
        );
        let resolver = PermissionResolver::new(repository.clone());

        let before = resolver.resolve_permissions(&identity("ana")).await;
        assert!(before.is_ok_and(|snapshot| snapshot.is_active));

        let updated = repository
            .update_active_flag(&identity("ana"), false, Utc::now())
            .await;
        assert_eq!(updated.ok(), Some(1));

        let after = resolver.resolve_permissions(&identity("ana")).await;
        assert!(after.is_ok_and(|snapshot| !snapshot.is_active));
        assert_eq!(*repository.lookups.lock().await, 2);
    }
}
