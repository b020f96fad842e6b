//! Generic entity actions.
//!
//! Every action follows the same order: validate input, resolve the
//! caller's permissions, check existence where a mutation depends on it,
//! issue exactly one store operation, and return the projection.

use std::sync::Arc;

use chrono::Utc;
use petcare_core::{AppError, AppResult, RecordId, UserIdentity};
use petcare_domain::{ListQuery, Page, RecordScope, RecordTimestamps};

use crate::{AuthorizationService, EntityKind, EntityRepository};

/// Raw pagination input for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// 1-based page number.
    pub page: i64,
    /// Page size, `1..=100`.
    pub limit: i64,
    /// Free-text search term.
    pub search: Option<String>,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

/// Create/get/list/delete actions over one entity type.
pub struct EntityService<E: EntityKind> {
    repository: Arc<dyn EntityRepository<E>>,
    authorization_service: AuthorizationService,
}

impl<E: EntityKind> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            authorization_service: self.authorization_service.clone(),
        }
    }
}

impl<E: EntityKind> EntityService<E> {
    /// Creates an entity service over a repository implementation.
    #[must_use]
    pub fn new(
        repository: Arc<dyn EntityRepository<E>>,
        authorization_service: AuthorizationService,
    ) -> Self {
        Self {
            repository,
            authorization_service,
        }
    }

    /// Returns one record by id.
    pub async fn get(&self, actor: &UserIdentity, id: &str) -> AppResult<E> {
        let id = RecordId::new(id)?;
        let snapshot = self
            .authorization_service
            .require_permission(actor, E::READ_PERMISSION)
            .await?;

        let record = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(not_found::<E>)?;

        // Records outside the caller's scope are reported as absent.
        if snapshot.role.record_scope(E::READ_PERMISSION) == RecordScope::Own
            && !record.is_owned_by(actor.subject())
        {
            return Err(not_found::<E>());
        }

        Ok(record)
    }

    /// Lists one page of records matching the filter and search term.
    pub async fn list(
        &self,
        actor: &UserIdentity,
        request: ListRequest,
        mut filter: E::Filter,
    ) -> AppResult<Page<E>> {
        let query = ListQuery::new(request.page, request.limit, request.search)?;
        let snapshot = self
            .authorization_service
            .require_permission(actor, E::READ_PERMISSION)
            .await?;

        if snapshot.role.record_scope(E::READ_PERMISSION) == RecordScope::Own
            && !E::restrict_to_owner(&mut filter, actor.subject())
        {
            return Err(AppError::Forbidden(
                E::READ_PERMISSION.denial_message().to_owned(),
            ));
        }

        self.repository.list(&query, &filter).await
    }

    /// Creates a record and returns it as re-read from the store.
    ///
    /// The id is always generated here and both timestamps are set to the
    /// same instant. Reading the row back surfaces store-computed values.
    pub async fn create(&self, actor: &UserIdentity, input: E::Input) -> AppResult<E> {
        let now = Utc::now();
        let draft = E::validate(input, now)?;
        self.authorization_service
            .require_permission(actor, E::MANAGE_PERMISSION)
            .await?;

        let id = RecordId::generate();
        self.repository
            .insert(&id, RecordTimestamps::created_at(now), &draft)
            .await?;

        self.repository.find_by_id(&id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "{} '{id}' was not readable after insert",
                E::DISPLAY_NAME
            ))
        })
    }

    /// Deletes a record after confirming it exists.
    ///
    /// The existence check and the delete are separate statements; the
    /// delete itself is scoped by id, so losing a race to a concurrent
    /// delete still reports `NotFound`.
    pub async fn delete(&self, actor: &UserIdentity, id: &str) -> AppResult<()> {
        let id = RecordId::new(id)?;
        self.authorization_service
            .require_permission(actor, E::MANAGE_PERMISSION)
            .await?;

        if self.repository.find_by_id(&id).await?.is_none() {
            return Err(not_found::<E>());
        }

        if self.repository.delete_by_id(&id).await? == 0 {
            return Err(not_found::<E>());
        }

        Ok(())
    }
}

fn not_found<E: EntityKind>() -> AppError {
    AppError::NotFound(E::not_found_message())
}
