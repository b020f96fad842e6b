use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::{ListQuery, Page};
use uuid::Uuid;

/// Converts an optional id filter into a bindable key.
///
/// Returns `None` when the filter names an id no row can have, so callers
/// can answer with an empty page without querying.
pub(crate) fn filter_key(id: Option<&RecordId>) -> Option<Option<Uuid>> {
    match id {
        None => Some(None),
        Some(id) => id.to_uuid().map(Some),
    }
}

/// Builds an `ILIKE` pattern matching the term anywhere.
pub(crate) fn search_pattern(search: Option<&str>) -> Option<String> {
    search.map(|term| {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

/// Page window as bindable `LIMIT` and `OFFSET` values.
pub(crate) fn page_window(query: &ListQuery) -> (i64, i64) {
    (
        i64::from(query.limit()),
        i64::try_from(query.offset()).unwrap_or(i64::MAX),
    )
}

/// Converts a row count into a page total.
pub(crate) fn page_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

pub(crate) fn empty_page<T>(query: &ListQuery) -> Page<T> {
    Page::new(Vec::new(), 0, query)
}

/// Reports a stored value that no longer parses into its domain type.
pub(crate) fn corrupt_column(table: &str, column: &str, error: AppError) -> AppError {
    AppError::Internal(format!("invalid {table}.{column} value in store: {error}"))
}

/// Parses a stored optional foreign key.
pub(crate) fn optional_record_id(value: Option<Uuid>) -> Option<RecordId> {
    value.map(RecordId::from_uuid)
}

/// Returns the key of a server-generated id.
pub(crate) fn primary_key(id: &RecordId) -> AppResult<Uuid> {
    id.to_uuid()
        .ok_or_else(|| AppError::Internal(format!("record id '{id}' is not a UUID")))
}

/// Binds a reference column; ids that are not UUIDs never exist.
pub(crate) fn reference_key(id: &RecordId, label: &str) -> AppResult<Uuid> {
    id.to_uuid()
        .ok_or_else(|| AppError::Validation(format!("{label} does not exist")))
}
