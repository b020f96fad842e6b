//! PostgreSQL-backed pet repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use petcare_application::EntityRepository;
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::{ListQuery, Page, Pet, PetDraft, PetFilter, RecordTimestamps, Species};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_support::{
    corrupt_column, empty_page, filter_key, optional_record_id, page_total, page_window,
    primary_key, reference_key, search_pattern,
};
use crate::store_errors::{classify_delete_error, classify_store_error};

/// PostgreSQL implementation of the pet repository port.
#[derive(Clone)]
pub struct PostgresPetRepository {
    pool: PgPool,
}

impl PostgresPetRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    id: Uuid,
    name: String,
    species: String,
    breed: Option<String>,
    birth_date: Option<NaiveDate>,
    owner_id: Uuid,
    clinic_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PetRow> for Pet {
    type Error = AppError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let species = Species::parse(row.species.as_str())
            .map_err(|error| corrupt_column("pets", "species", error))?;

        Ok(Self {
            id: RecordId::from_uuid(row.id),
            name: row.name,
            species,
            breed: row.breed,
            birth_date: row.birth_date,
            owner_id: RecordId::from_uuid(row.owner_id),
            clinic_id: optional_record_id(row.clinic_id),
            timestamps: RecordTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

#[async_trait]
impl EntityRepository<Pet> for PostgresPetRepository {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Pet>> {
        let Some(key) = id.to_uuid() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PetRow>(
            r#"
            SELECT id, name, species, breed, birth_date, owner_id, clinic_id,
                   created_at, updated_at
            FROM pets
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "find pet"))?;

        row.map(Pet::try_from).transpose()
    }

    async fn list(&self, query: &ListQuery, filter: &PetFilter) -> AppResult<Page<Pet>> {
        let (Some(owner_id), Some(clinic_id)) = (
            filter_key(filter.owner_id.as_ref()),
            filter_key(filter.clinic_id.as_ref()),
        ) else {
            return Ok(empty_page(query));
        };
        let species = filter.species.map(|species| species.as_str());
        let search = search_pattern(query.search());
        let (limit, offset) = page_window(query);

        let rows = sqlx::query_as::<_, PetRow>(
            r#"
            SELECT id, name, species, breed, birth_date, owner_id, clinic_id,
                   created_at, updated_at
            FROM pets
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::uuid IS NULL OR clinic_id = $2)
              AND ($3::text IS NULL OR species = $3)
              AND ($4::text IS NULL OR name ILIKE $4)
            ORDER BY created_at DESC, id
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(owner_id)
        .bind(clinic_id)
        .bind(species)
        .bind(search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "list pets"))?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM pets
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::uuid IS NULL OR clinic_id = $2)
              AND ($3::text IS NULL OR species = $3)
              AND ($4::text IS NULL OR name ILIKE $4)
            "#,
        )
        .bind(owner_id)
        .bind(clinic_id)
        .bind(species)
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "count pets"))?;

        let items = rows
            .into_iter()
            .map(Pet::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, page_total(count), query))
    }

    async fn insert(
        &self,
        id: &RecordId,
        timestamps: RecordTimestamps,
        draft: &PetDraft,
    ) -> AppResult<()> {
        let key = primary_key(id)?;
        let owner_id = reference_key(draft.owner_id(), "Owner")?;
        let clinic_id = draft
            .clinic_id()
            .map(|clinic_id| reference_key(clinic_id, "Clinic"))
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO pets (
                id, name, species, breed, birth_date, owner_id, clinic_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(key)
        .bind(draft.name())
        .bind(draft.species().as_str())
        .bind(draft.breed())
        .bind(draft.birth_date())
        .bind(owner_id)
        .bind(clinic_id)
        .bind(timestamps.created_at)
        .bind(timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "insert pet"))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> AppResult<u64> {
        let Some(key) = id.to_uuid() else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|error| classify_delete_error(error, "Pet"))?;

        Ok(result.rows_affected())
    }
}
