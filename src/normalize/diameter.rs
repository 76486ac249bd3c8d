use crate::error::{NormalizeError, Result};

/// Largest nominal diameter (mm) the dataset can plausibly contain.
const MAX_DIAMETER_MM: i64 = 200;

/// Reconcile the redundant legacy width columns into at most one diameter.
///
/// The columns disagree by a few millimetres at most when they describe the
/// same fitting; snapping each down to the preceding multiple of 5 absorbs
/// that noise. If the snapped values still disagree, the record's diameter is
/// too ambiguous to trust and is dropped rather than guessed.
pub fn reconcile_diameter(candidates: &[&str]) -> Result<Option<String>> {
    let parsed: Vec<f64> = candidates
        .iter()
        .filter_map(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| *value > 0.0)
        .collect();
    if parsed.is_empty() {
        return Ok(None);
    }

    let rounded: Vec<i64> = parsed.iter().map(|value| (*value as i64 / 5) * 5).collect();
    if !rounded.iter().any(|value| *value >= 5) {
        return Err(NormalizeError::Validation(format!(
            "no plausible diameter among {:?}",
            candidates
        )));
    }

    let first = rounded[0];
    if rounded.iter().any(|value| *value != first) {
        return Ok(None);
    }
    if first > MAX_DIAMETER_MM {
        return Err(NormalizeError::Validation(format!(
            "diameter {} implausibly large",
            first
        )));
    }
    Ok(Some(first.to_string()))
}
