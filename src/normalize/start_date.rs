use crate::error::{NormalizeError, Result};
use regex::Regex;
use std::sync::LazyLock;

static START_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})/\d{2}/\d{2}$").expect("valid start date regex"));

/// Reduce the commissioning date to its year. Day and month are placeholder
/// values in the source data and are dropped.
pub fn extract_start_year(raw: Option<&str>) -> Result<Option<String>> {
    let raw = match raw {
        None => return Ok(None),
        Some(raw) if raw.is_empty() => return Ok(None),
        Some(raw) => raw,
    };
    let captures = START_DATE_RE.captures(raw).ok_or_else(|| {
        NormalizeError::Format(format!("commissioning date '{}' is not YYYY/MM/DD", raw))
    })?;
    Ok(Some(captures[1].to_string()))
}
