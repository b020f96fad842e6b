use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petcare_application::{EntityKind, EntityRepository, IdentityRepository};
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::{ListQuery, Page, PermissionSnapshot, RecordTimestamps, User};
use tokio::sync::RwLock;

/// In-memory entity repository implementation.
#[derive(Debug)]
pub struct InMemoryEntityRepository<E: EntityKind> {
    records: RwLock<HashMap<RecordId, E>>,
}

impl<E: EntityKind> InMemoryEntityRepository<E> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository pre-populated with records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        Self {
            records: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.id().clone(), record))
                    .collect(),
            ),
        }
    }
}

impl<E: EntityKind> Default for InMemoryEntityRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: EntityKind> EntityRepository<E> for InMemoryEntityRepository<E> {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<E>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self, query: &ListQuery, filter: &E::Filter) -> AppResult<Page<E>> {
        let records = self.records.read().await;

        let mut matching: Vec<E> = records
            .values()
            .filter(|record| record.matches(filter, query.search()))
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            right
                .timestamps()
                .created_at
                .cmp(&left.timestamps().created_at)
                .then_with(|| left.id().cmp(right.id()))
        });

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(query.limit() as usize)
            .collect();

        Ok(Page::new(items, total, query))
    }

    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &E::Draft,
    ) -> AppResult<()> {
        let mut records = self.records.write().await;

        if records.contains_key(id) {
            return Err(AppError::Conflict(format!(
                "{} '{id}' already exists",
                E::DISPLAY_NAME
            )));
        }

        records.insert(id.clone(), E::build(id.clone(), timestamps, draft.clone()));
        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64> {
        Ok(u64::from(self.records.write().await.remove(id).is_some()))
    }
}

#[async_trait]
impl IdentityRepository for InMemoryEntityRepository<User> {
    async fn find_permission_snapshot(
        &self,
        identity_id: &RecordId,
    ) -> AppResult<Option<PermissionSnapshot>> {
        Ok(self
            .records
            .read()
            .await
            .get(identity_id)
            .map(User::permission_snapshot))
    }

    async fn update_active_flag(
        &self,
        identity_id: &RecordId,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut records = self.records.write().await;

        let Some(user) = records.get_mut(identity_id) else {
            return Ok(0);
        };
        user.is_active = is_active;
        user.timestamps.updated_at = updated_at;

        Ok(1)
    }
}
