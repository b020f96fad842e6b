use petcare_core::AppError;
use tracing::warn;

const UNDEFINED_TABLE: &str = "42P01";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a store failure to the application error taxonomy.
///
/// Every repository routes its `sqlx` errors through here so missing-schema
/// detection happens in one place.
pub(crate) fn classify_store_error(error: sqlx::Error, operation: &str) -> AppError {
    let sqlx::Error::Database(ref database_error) = error else {
        return AppError::Internal(format!("failed to {operation}: {error}"));
    };

    let code = database_error.code();
    let code = code.as_deref();

    if is_missing_relation(code, database_error.message()) {
        warn!(operation, "store reported a missing relation");
        return AppError::SchemaMissing(
            "Database schema is not initialized. Run `petcare-api migrate` and retry.".to_owned(),
        );
    }

    match code {
        Some(UNIQUE_VIOLATION) => {
            warn!(operation, "store rejected a duplicate value");
            AppError::Conflict("A record with the same unique value already exists".to_owned())
        }
        Some(FOREIGN_KEY_VIOLATION) => {
            warn!(operation, "store rejected a dangling reference");
            AppError::Validation("A referenced record does not exist".to_owned())
        }
        _ => AppError::Internal(format!("failed to {operation}: {error}")),
    }
}

/// Maps a failed delete, reporting rows that other records still point at.
///
/// On delete a foreign-key violation means the row is referenced by a
/// `RESTRICT` constraint, not that a reference is dangling.
pub(crate) fn classify_delete_error(error: sqlx::Error, display_name: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    {
        warn!(entity = display_name, "store refused to delete a referenced row");
        return AppError::Conflict(format!(
            "{display_name} is still referenced by other records"
        ));
    }

    classify_store_error(
        error,
        format!("delete {}", display_name.to_lowercase()).as_str(),
    )
}

/// Returns whether a store failure means a table is missing.
///
/// The SQLSTATE code wins; the message text is only consulted for drivers
/// and proxies that drop the code.
pub(crate) fn is_missing_relation(code: Option<&str>, message: &str) -> bool {
    if let Some(code) = code {
        return code == UNDEFINED_TABLE;
    }

    let message = message.to_lowercase();
    message.contains("relation") && message.contains("does not exist")
}
