//! Account status management for clinic staff and tutors.

use std::sync::Arc;

use chrono::Utc;
use petcare_core::{AppError, AppResult, RecordId, UserIdentity};
use petcare_domain::{Permission, User};

use crate::{AuthorizationService, EntityRepository, IdentityRepository};

/// Activates and deactivates user accounts.
#[derive(Clone)]
pub struct UserAccountService {
    users: Arc<dyn EntityRepository<User>>,
    identities: Arc<dyn IdentityRepository>,
    authorization_service: AuthorizationService,
}

impl UserAccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(
        users: Arc<dyn EntityRepository<User>>,
        identities: Arc<dyn IdentityRepository>,
        authorization_service: AuthorizationService,
    ) -> Self {
        Self {
            users,
            identities,
            authorization_service,
        }
    }

    /// Sets the active flag of a user and returns the updated record.
    ///
    /// Deactivation takes effect on the user's next permission check.
    pub async fn set_active(
        &self,
        actor: &UserIdentity,
        user_id: &str,
        is_active: bool,
    ) -> AppResult<User> {
        let user_id = RecordId::new(user_id)?;
        self.authorization_service
            .require_permission(actor, Permission::UserManage)
            .await?;

        if !is_active && &user_id == actor.subject() {
            return Err(AppError::Validation(
                "You cannot deactivate your own account".to_owned(),
            ));
        }

        if self.users.find_by_id(&user_id).await?.is_none() {
            return Err(user_not_found());
        }

        if self
            .identities
            .update_active_flag(&user_id, is_active, Utc::now())
            .await?
            == 0
        {
            return Err(user_not_found());
        }

        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(user_not_found)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use petcare_core::{AppError, AppResult, RecordId, UserIdentity};
    use petcare_domain::{
        ListQuery, Page, PermissionSnapshot, RecordTimestamps, Role, User, UserDraft, UserFilter,
    };
    use tokio::sync::Mutex;

    use crate::{
        AuthorizationService, EntityRepository, IdentityRepository, PermissionResolver,
    };

    use super::UserAccountService;

    #[derive(Default)]
    struct FakeUserStore {
        users: Mutex<Vec<User>>,
        updates: Mutex<usize>,
    }

    #[async_trait]
    impl EntityRepository<User> for FakeUserStore {
        async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|user| &user.id == id)
                .cloned())
        }

        async fn list(&self, query: &ListQuery, _filter: &UserFilter) -> AppResult<Page<User>> {
            let users = self.users.lock().await.clone();
            let total = users.len() as u64;
            Ok(Page::new(users, total, query))
        }

        async fn insert(
            &self,
            _id: &RecordId,
            _timestamps: RecordTimestamps,
            _draft: &UserDraft,
        ) -> AppResult<()> {
            Err(AppError::Internal("inserts are not used here".to_owned()))
        }

        async fn delete_by_id(&self, _id: &RecordId) -> AppResult<u64> {
            Ok(0)
        }
    }

    #[async_trait]
    impl IdentityRepository for FakeUserStore {
        async fn find_permission_snapshot(
            &self,
            identity_id: &RecordId,
        ) -> AppResult<Option<PermissionSnapshot>> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|user| &user.id == identity_id)
                .map(User::permission_snapshot))
        }

        async fn update_active_flag(
            &self,
            identity_id: &RecordId,
            is_active: bool,
            updated_at: DateTime<Utc>,
        ) -> AppResult<u64> {
            *self.updates.lock().await += 1;
            let mut users = self.users.lock().await;
            Ok(users
                .iter_mut()
                .find(|user| &user.id == identity_id)
                .map(|user| {
                    user.is_active = is_active;
                    user.timestamps.updated_at = updated_at;
                    1
                })
                .unwrap_or(0))
        }
    }

    fn id(value: &str) -> RecordId {
        RecordId::new(value).unwrap_or_else(|error| panic!("valid id: {error}"))
    }

    fn user(subject: &str, role: Role) -> User {
        User {
            id: id(subject),
            name: subject.to_owned(),
            email: format!("{subject}@clinic.test"),
            role,
            is_active: true,
            clinic_id: None,
            timestamps: RecordTimestamps::created_at(Utc::now()),
        }
    }

    async fn service_with(users: Vec<User>) -> (UserAccountService, Arc<FakeUserStore>) {
        let store = Arc::new(FakeUserStore::default());
        *store.users.lock().await = users;
        let authorization =
            AuthorizationService::new(PermissionResolver::new(store.clone()));
        (
            UserAccountService::new(store.clone(), store.clone(), authorization),
            store,
        )
    }

    #[tokio::test]
    async fn deactivation_applies_to_the_next_permission_check() {
        let (service, _store) = service_with(vec![
            user("ana", Role::Admin),
            user("bia", Role::Receptionist),
        ])
        .await;

        let updated = service
            .set_active(&UserIdentity::new(id("ana")), "bia", false)
            .await
            .unwrap_or_else(|error| panic!("deactivation should succeed: {error}"));
        assert!(!updated.is_active);
        assert!(updated.timestamps.updated_at >= updated.timestamps.created_at);

        let denied = service
            .set_active(&UserIdentity::new(id("bia")), "ana", true)
            .await;
        assert!(matches!(denied, Err(AppError::Forbidden(message))
            if message == "Your account is inactive"));
    }

    #[tokio::test]
    async fn admins_cannot_deactivate_themselves() {
        let (service, store) = service_with(vec![user("ana", Role::Admin)]).await;

        let result = service
            .set_active(&UserIdentity::new(id("ana")), "ana", false)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(*store.updates.lock().await, 0);
    }

    #[tokio::test]
    async fn unknown_users_are_not_found() {
        let (service, store) = service_with(vec![user("ana", Role::Admin)]).await;

        let result = service
            .set_active(&UserIdentity::new(id("ana")), "ghost", false)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(message)) if message == "User not found"));
        assert_eq!(*store.updates.lock().await, 0);
    }

    #[tokio::test]
    async fn non_admins_cannot_change_status() {
        let (service, store) = service_with(vec![
            user("vet", Role::Veterinarian),
            user("bia", Role::Receptionist),
        ])
        .await;

        let result = service
            .set_active(&UserIdentity::new(id("vet")), "bia", false)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(*store.updates.lock().await, 0);
    }
}
