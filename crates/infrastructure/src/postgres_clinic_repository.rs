//! PostgreSQL-backed clinic repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petcare_application::EntityRepository;
use petcare_core::{AppResult, RecordId};
use petcare_domain::{Clinic, ClinicDraft, ClinicFilter, ListQuery, Page, RecordTimestamps};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_support::{page_total, page_window, primary_key, search_pattern};
use crate::store_errors::{classify_delete_error, classify_store_error};

/// PostgreSQL implementation of the clinic repository port.
#[derive(Clone)]
pub struct PostgresClinicRepository {
    pool: PgPool,
}

impl PostgresClinicRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClinicRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClinicRow> for Clinic {
    fn from(row: ClinicRow) -> Self {
        Self {
            id: RecordId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            timestamps: RecordTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[async_trait]
impl EntityRepository<Clinic> for PostgresClinicRepository {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Clinic>> {
        let Some(key) = id.to_uuid() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ClinicRow>(
            r#"
            SELECT id, name, email, phone, address, city, state, created_at, updated_at
            FROM clinics
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "find clinic"))?;

        Ok(row.map(Clinic::from))
    }

    async fn list(&self, query: &ListQuery, filter: &ClinicFilter) -> AppResult<Page<Clinic>> {
        let search = search_pattern(query.search());
        let (limit, offset) = page_window(query);

        let rows = sqlx::query_as::<_, ClinicRow>(
            r#"
            SELECT id, name, email, phone, address, city, state, created_at, updated_at
            FROM clinics
            WHERE ($1::text IS NULL OR LOWER(city) = LOWER($1))
              AND ($2::text IS NULL OR name ILIKE $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.city.as_deref())
        .bind(search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "list clinics"))?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM clinics
            WHERE ($1::text IS NULL OR LOWER(city) = LOWER($1))
              AND ($2::text IS NULL OR name ILIKE $2)
            "#,
        )
        .bind(filter.city.as_deref())
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "count clinics"))?;

        Ok(Page::new(
            rows.into_iter().map(Clinic::from).collect(),
            page_total(count),
            query,
        ))
    }

    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &ClinicDraft,
    ) -> AppResult<()> {
        let key = primary_key(id)?;

        sqlx::query(
            r#"
            INSERT INTO clinics (
                id, name, email, phone, address, city, state, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(key)
        .bind(draft.name())
        .bind(draft.email())
        .bind(draft.phone())
        .bind(draft.address())
        .bind(draft.city())
        .bind(draft.state())
        .bind(timestamps.created_at)
        .bind(timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "insert clinic"))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64> {
        let Some(key) = id.to_uuid() else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM clinics WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|error| classify_delete_error(error, "Clinic"))?;

        Ok(result.rows_affected())
    }
}
