use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use petcare_application::ListRequest;
use petcare_core::{AppError, AppResult, RecordId};
use petcare_domain::Page;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

impl HealthResponse {
    pub fn new(status: &str, database: &str) -> Self {
        Self {
            status: status.to_owned(),
            database: database.to_owned(),
        }
    }
}

/// Payload of a successful delete.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-response.ts"
)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// One page of entity projections.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/list-response.ts"
)]
pub struct ListResponse<T: TS> {
    pub success: bool,
    pub items: Vec<T>,
    #[ts(type = "number")]
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[ts(type = "number")]
    pub total_pages: u64,
}

impl<T: TS> ListResponse<T> {
    pub fn from_page<E>(page: Page<E>) -> Self
    where
        T: From<E>,
    {
        let total_pages = page.total_pages();
        Self {
            success: true,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages,
            items: page.items.into_iter().map(T::from).collect(),
        }
    }
}

/// Builds pagination input from raw query-string values.
pub(super) fn list_request(
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
) -> AppResult<ListRequest> {
    let defaults = ListRequest::default();

    Ok(ListRequest {
        page: integer_param("Page", page)?.unwrap_or(defaults.page),
        limit: integer_param("Limit", limit)?.unwrap_or(defaults.limit),
        search,
    })
}

fn integer_param(label: &str, value: Option<String>) -> AppResult<Option<i64>> {
    match non_blank(value) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{label} must be a whole number"))),
    }
}

/// Treats blank query-string values as absent.
pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub(super) fn id_filter(value: Option<String>) -> AppResult<Option<RecordId>> {
    non_blank(value).map(RecordId::new).transpose()
}

pub(super) fn bool_filter(label: &str, value: Option<String>) -> AppResult<Option<bool>> {
    match non_blank(value).as_deref() {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(_) => Err(AppError::Validation(format!(
            "{label} must be true or false"
        ))),
    }
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub(super) fn parse_date(label: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("{label} must be a valid date (YYYY-MM-DD)"))
    })
}

pub(super) fn optional_date(label: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|value| parse_date(label, value.as_str()))
        .transpose()
}

pub(super) fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use petcare_core::AppError;

    use super::{bool_filter, list_request, optional_date};

    #[test]
    fn list_request_defaults_and_parses() {
        let defaults = list_request(None, None, None)
            .unwrap_or_else(|error| panic!("defaults should parse: {error}"));
        assert_eq!((defaults.page, defaults.limit), (1, 10));

        let explicit = list_request(Some("3".to_owned()), Some(" 25 ".to_owned()), None)
            .unwrap_or_else(|error| panic!("numbers should parse: {error}"));
        assert_eq!((explicit.page, explicit.limit), (3, 25));

        assert!(matches!(
            list_request(None, Some("ten".to_owned()), None),
            Err(AppError::Validation(message)) if message == "Limit must be a whole number"
        ));
    }

    #[test]
    fn boolean_filters_accept_only_literals() {
        assert_eq!(bool_filter("isActive", None).ok(), Some(None));
        assert_eq!(
            bool_filter("isActive", Some("false".to_owned())).ok(),
            Some(Some(false))
        );
        assert!(bool_filter("isActive", Some("yes".to_owned())).is_err());
    }

    #[test]
    fn dates_use_iso_format() {
        assert_eq!(
            optional_date("Birth date", Some("2020-02-29".to_owned())).ok(),
            Some(NaiveDate::from_ymd_opt(2020, 2, 29))
        );
        assert_eq!(optional_date("Birth date", Some(" ".to_owned())).ok(), Some(None));
        assert!(optional_date("Birth date", Some("29/02/2020".to_owned())).is_err());
    }
}
