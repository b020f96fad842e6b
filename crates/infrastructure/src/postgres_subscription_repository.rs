//! PostgreSQL-backed subscription repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use petcare_application::EntityRepository;
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::{
    ListQuery, Page, RecordTimestamps, Subscription, SubscriptionDraft, SubscriptionFilter,
    SubscriptionStatus,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_support::{
    corrupt_column, empty_page, filter_key, page_total, page_window, primary_key, reference_key,
};
use crate::store_errors::{classify_delete_error, classify_store_error};

/// PostgreSQL implementation of the subscription repository port.
#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    pet_id: Uuid,
    plan_id: Uuid,
    status: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = AppError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let status = SubscriptionStatus::parse(row.status.as_str())
            .map_err(|error| corrupt_column("subscriptions", "status", error))?;

        Ok(Self {
            id: RecordId::from_uuid(row.id),
            pet_id: RecordId::from_uuid(row.pet_id),
            plan_id: RecordId::from_uuid(row.plan_id),
            status,
            start_date: row.start_date,
            end_date: row.end_date,
            timestamps: RecordTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

#[async_trait]
impl EntityRepository<Subscription> for PostgresSubscriptionRepository {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Subscription>> {
        let Some(key) = id.to_uuid() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT id, pet_id, plan_id, status, start_date, end_date, created_at, updated_at
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "find subscription"))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn list(
        &self,
        query: &ListQuery,
        filter: &SubscriptionFilter,
    ) -> AppResult<Page<Subscription>> {
        let (Some(pet_id), Some(plan_id)) = (
            filter_key(filter.pet_id.as_ref()),
            filter_key(filter.plan_id.as_ref()),
        ) else {
            return Ok(empty_page(query));
        };
        let status = filter.status.map(|status| status.as_str());
        let (limit, offset) = page_window(query);

        // Subscriptions have no free-text column; the search term is ignored.
        let rows = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT id, pet_id, plan_id, status, start_date, end_date, created_at, updated_at
            FROM subscriptions
            WHERE ($1::uuid IS NULL OR pet_id = $1)
              AND ($2::uuid IS NULL OR plan_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY created_at DESC, id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(pet_id)
        .bind(plan_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "list subscriptions"))?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM subscriptions
            WHERE ($1::uuid IS NULL OR pet_id = $1)
              AND ($2::uuid IS NULL OR plan_id = $2)
              AND ($3::text IS NULL OR status = $3)
            "#,
        )
        .bind(pet_id)
        .bind(plan_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "count subscriptions"))?;

        let items = rows
            .into_iter()
            .map(Subscription::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, page_total(count), query))
    }

    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &SubscriptionDraft,
    ) -> AppResult<()> {
        let key = primary_key(id)?;
        let pet_id = reference_key(draft.pet_id(), "Pet")?;
        let plan_id = reference_key(draft.plan_id(), "Plan")?;

        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, pet_id, plan_id, status, start_date, end_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(key)
        .bind(pet_id)
        .bind(plan_id)
        .bind(draft.status().as_str())
        .bind(draft.start_date())
        .bind(draft.end_date())
        .bind(timestamps.created_at)
        .bind(timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "insert subscription"))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64> {
        let Some(key) = id.to_uuid() else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|error| classify_delete_error(error, "Subscription"))?;

        Ok(result.rows_affected())
    }
}
