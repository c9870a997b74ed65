use std::sync::LazyLock;

use regex::Regex;

use crate::error::ApiError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Trimmed value of a required string field.
pub fn required(field: &str, value: Option<&str>) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::BadRequest(format!("{} is required", field))),
    }
}

/// Blank optional strings are treated as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Loose `local@domain.tld` shape check; no whitespace anywhere.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn email(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if is_email(value) {
        Ok(value.to_string())
    } else {
        Err(ApiError::BadRequest(format!("{} must be a valid email address", field)))
    }
}
