use super::{ValidationRules, STATUS_FIELD};
use crate::error::{NormalizeError, Result};
use crate::kml::reader::{RawFeature, SchemaField};
use std::collections::{HashMap, HashSet};

/// Extract the attribute bag of one placemark, checked against the declared
/// schema. The schema is the single source of truth for legal field names.
pub fn extract_attributes(
    feature: &RawFeature,
    schema: &[SchemaField],
    rules: &ValidationRules,
) -> Result<HashMap<String, String>> {
    let entries = feature
        .attributes
        .as_ref()
        .ok_or_else(|| NormalizeError::Structural("hydrant has no extended data".to_string()))?;
    let legal_names: HashSet<&str> = schema.iter().map(|field| field.name.as_str()).collect();

    let mut attributes = HashMap::new();
    for entry in entries {
        if entry.name.is_empty() {
            return Err(NormalizeError::Structural(
                "hydrant attribute with an empty name".to_string(),
            ));
        }
        if !legal_names.contains(entry.name.as_str()) {
            return Err(NormalizeError::Validation(format!(
                "attribute '{}' is not declared in the schema",
                entry.name
            )));
        }
        attributes.insert(entry.name.clone(), entry.value.clone());
    }

    if let Some(required_status) = &rules.required_status {
        match attributes.get(STATUS_FIELD) {
            Some(status) if status == required_status => {}
            Some(status) => {
                return Err(NormalizeError::Validation(format!(
                    "hydrant status '{}' is not '{}'",
                    status, required_status
                )))
            }
            None => {
                return Err(NormalizeError::Validation(format!(
                    "hydrant has no {} field",
                    STATUS_FIELD
                )))
            }
        }
    }

    Ok(attributes)
}
