use super::*;

#[derive(Debug, sqlx::FromRow)]
struct SnapshotRow {
    role: String,
    is_active: bool,
}

#[async_trait]
impl IdentityRepository for PostgresUserRepository {
    async fn find_permission_snapshot(
        &self,
        identity_id: &RecordId,
    ) -> AppResult<Option<PermissionSnapshot>> {
        let Some(key) = identity_id.to_uuid() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT role, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "resolve user permissions"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role =
            Role::parse(row.role.as_str()).map_err(|error| corrupt_column("users", "role", error))?;

        Ok(Some(PermissionSnapshot {
            role,
            is_active: row.is_active,
        }))
    }

    async fn update_active_flag(
        &self,
        identity_id: &RecordId,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let Some(key) = identity_id.to_uuid() else {
            return Ok(0);
        };

        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(key)
        .bind(is_active)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| classify_store_error(error, "update user status"))?;

        Ok(result.rows_affected())
    }
}
