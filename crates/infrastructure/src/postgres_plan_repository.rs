//! PostgreSQL-backed plan repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petcare_application::EntityRepository;
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::{ListQuery, Page, Plan, PlanDraft, PlanFilter, PlanStatus, RecordTimestamps};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_support::{corrupt_column, page_total, page_window, primary_key, search_pattern};
use crate::store_errors::{classify_delete_error, classify_store_error};

/// PostgreSQL implementation of the plan repository port.
#[derive(Clone)]
pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: i64,
    care_period_days: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = AppError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let status = PlanStatus::parse(row.status.as_str())
            .map_err(|error| corrupt_column("plans", "status", error))?;

        Ok(Self {
            id: RecordId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            care_period_days: row.care_period_days,
            status,
            timestamps: RecordTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

#[async_trait]
impl EntityRepository<Plan> for PostgresPlanRepository {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Plan>> {
        let Some(key) = id.to_uuid() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, description, price, care_period_days, status,
                   created_at, updated_at
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "find plan"))?;

        row.map(Plan::try_from).transpose()
    }

    async fn list(&self, query: &ListQuery, filter: &PlanFilter) -> AppResult<Page<Plan>> {
        let status = filter.status.map(|status| status.as_str());
        let search = search_pattern(query.search());
        let (limit, offset) = page_window(query);

        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, description, price, care_period_days, status,
                   created_at, updated_at
            FROM plans
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR name ILIKE $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(status)
        .bind(search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "list plans"))?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM plans
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR name ILIKE $2)
            "#,
        )
        .bind(status)
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "count plans"))?;

        let items = rows
            .into_iter()
            .map(Plan::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, page_total(count), query))
    }

    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &PlanDraft,
    ) -> AppResult<()> {
        let key = primary_key(id)?;

        sqlx::query(
            r#"
            INSERT INTO plans (
                id, name, description, price, care_period_days, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(key)
        .bind(draft.name())
        .bind(draft.description())
        .bind(draft.price())
        .bind(draft.care_period_days())
        .bind(draft.status().as_str())
        .bind(timestamps.created_at)
        .bind(timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "insert plan"))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64> {
        let Some(key) = id.to_uuid() else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|error| classify_delete_error(error, "Plan"))?;

        Ok(result.rows_affected())
    }
}
