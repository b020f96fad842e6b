use petcare_core::{AppError, AppResult, RecordId};

/// Trims a required text field and enforces a maximum length.
pub(crate) fn required_text(label: &str, value: &str, max_chars: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{label} is required")));
    }

    ensure_max_chars(label, trimmed, max_chars)?;
    Ok(trimmed.to_owned())
}

/// Trims an optional text field; blank values become `None`.
pub(crate) fn optional_text(
    label: &str,
    value: Option<String>,
    max_chars: usize,
) -> AppResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    ensure_max_chars(label, trimmed, max_chars)?;
    Ok(Some(trimmed.to_owned()))
}

/// Validates a required reference to another record.
pub(crate) fn required_reference(label: &str, value: &str) -> AppResult<RecordId> {
    RecordId::new(value).map_err(|_| AppError::Validation(format!("{label} is required")))
}

/// Validates an optional reference; blank values become `None`.
pub(crate) fn optional_reference(value: Option<String>) -> Option<RecordId> {
    value.and_then(|value| RecordId::new(value).ok())
}

/// Case-insensitive substring match used by in-process listings.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn ensure_max_chars(label: &str, value: &str, max_chars: usize) -> AppResult<()> {
    if value.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{label} must not exceed {max_chars} characters"
        )));
    }

    Ok(())
}
