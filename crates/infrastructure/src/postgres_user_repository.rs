//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petcare_application::{EntityRepository, IdentityRepository};
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::{
    ListQuery, Page, PermissionSnapshot, RecordTimestamps, Role, User, UserDraft, UserFilter,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_support::{
    corrupt_column, empty_page, filter_key, optional_record_id, page_total, page_window,
    primary_key, reference_key, search_pattern,
};
use crate::store_errors::{classify_delete_error, classify_store_error};

/// PostgreSQL implementation of the user and identity repository ports.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    is_active: bool,
    clinic_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role =
            Role::parse(row.role.as_str()).map_err(|error| corrupt_column("users", "role", error))?;

        Ok(Self {
            id: RecordId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            role,
            is_active: row.is_active,
            clinic_id: optional_record_id(row.clinic_id),
            timestamps: RecordTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

mod identity;

#[async_trait]
impl EntityRepository<User> for PostgresUserRepository {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<User>> {
        let Some(key) = id.to_uuid() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, is_active, clinic_id, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "find user"))?;

        row.map(User::try_from).transpose()
    }

    async fn list(&self, query: &ListQuery, filter: &UserFilter) -> AppResult<Page<User>> {
        let Some(clinic_id) = filter_key(filter.clinic_id.as_ref()) else {
            return Ok(empty_page(query));
        };
        let role = filter.role.map(|role| role.as_str());
        let search = search_pattern(query.search());
        let (limit, offset) = page_window(query);

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, is_active, clinic_id, created_at, updated_at
            FROM users
            WHERE ($1::text IS NULL OR role = $1)
              AND ($2::uuid IS NULL OR clinic_id = $2)
              AND ($3::boolean IS NULL OR is_active = $3)
              AND ($4::text IS NULL OR name ILIKE $4 OR email ILIKE $4)
            ORDER BY created_at DESC, id
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(role)
        .bind(clinic_id)
        .bind(filter.is_active)
        .bind(search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "list users"))?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::text IS NULL OR role = $1)
              AND ($2::uuid IS NULL OR clinic_id = $2)
              AND ($3::boolean IS NULL OR is_active = $3)
              AND ($4::text IS NULL OR name ILIKE $4 OR email ILIKE $4)
            "#,
        )
        .bind(role)
        .bind(clinic_id)
        .bind(filter.is_active)
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "count users"))?;

        let items = rows
            .into_iter()
            .map(User::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, page_total(count), query))
    }

    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &UserDraft,
    ) -> AppResult<()> {
        let key = primary_key(id)?;
        let clinic_id = draft
            .clinic_id()
            .map(|clinic_id| reference_key(clinic_id, "Clinic"))
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, role, is_active, clinic_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(key)
        .bind(draft.name())
        .bind(draft.email())
        .bind(draft.role().as_str())
        .bind(draft.is_active())
        .bind(clinic_id)
        .bind(timestamps.created_at)
        .bind(timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| match classify_store_error(error, "insert user") {
            AppError::Conflict(_) => {
                AppError::Conflict("A user with this email already exists".to_owned())
            }
            other => other,
        })?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64> {
        let Some(key) = id.to_uuid() else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|error| classify_delete_error(error, "User"))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests;
