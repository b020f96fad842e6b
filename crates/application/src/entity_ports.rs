use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petcare_core::{AppResult, RecordId};
use petcare_domain::{ListQuery, Page, Permission, RecordTimestamps};

/// Per-entity configuration consumed by the generic action executor.
///
/// Implementors are the entity projections themselves; everything that
/// differs between clinics, pets, plans, subscriptions and users lives here
/// so the control flow in [`crate::EntityService`] stays shared.
pub trait EntityKind: Clone + Debug + Send + Sync + 'static {
    /// Human-readable entity name used in user-facing messages.
    const DISPLAY_NAME: &'static str;
    /// Permission required by get and list.
    const READ_PERMISSION: Permission;
    /// Permission required by create and delete.
    const MANAGE_PERMISSION: Permission;

    /// Raw creation input.
    type Input: Send;
    /// Validated creation input.
    type Draft: Clone + Debug + Send + Sync;
    /// Equality filters accepted by listings.
    type Filter: Clone + Debug + Default + Send + Sync;

    /// Validates creation input; `now` is the instant the action started.
    fn validate(input: Self::Input, now: DateTime<Utc>) -> AppResult<Self::Draft>;

    /// Materializes the projection a store holds for a draft.
    fn build(id: RecordId, timestamps: RecordTimestamps, draft: Self::Draft) -> Self;

    /// Returns the record identifier.
    fn id(&self) -> &RecordId;

    /// Returns creation and update instants.
    fn timestamps(&self) -> RecordTimestamps;

    /// Returns whether the record passes a listing filter and search term.
    fn matches(&self, filter: &Self::Filter, search: Option<&str>) -> bool;

    /// Narrows a listing filter to records owned by `owner_id`.
    ///
    /// Returns `false` when the entity has no notion of ownership.
    fn restrict_to_owner(_filter: &mut Self::Filter, _owner_id: &RecordId) -> bool {
        false
    }

    /// Returns whether `owner_id` owns this record.
    fn is_owned_by(&self, _owner_id: &RecordId) -> bool {
        false
    }

    /// Returns the message reported when a record is absent.
    #[must_use]
    fn not_found_message() -> String {
        format!("{} not found", Self::DISPLAY_NAME)
    }
}

/// Repository port for one entity table.
///
/// Every method issues exactly one store operation.
#[async_trait]
pub trait EntityRepository<E: EntityKind>: Send + Sync {
    /// Finds one record by id; ids that are not valid store keys are absent.
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<E>>;

    /// Lists one page of records, newest first, plus the total match count.
    async fn list(&self, query: &ListQuery, filter: &E::Filter) -> AppResult<Page<E>>;

    /// Inserts a new record under a server-generated id.
    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &E::Draft,
    ) -> AppResult<()>;

    /// Deletes the record with this id; returns the number of rows removed.
    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64>;
}
