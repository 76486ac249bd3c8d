pub mod attributes;
pub mod coordinates;
pub mod diameter;
pub mod hydrant_type;
pub mod identity;
pub mod start_date;

use crate::error::{NormalizeError, Result};
use crate::kml::reader::{RawFeature, SchemaField};
use self::hydrant_type::HydrantType;
use std::collections::HashMap;

// Field names used by the EWK Kirchzarten dataset.
pub const STATUS_FIELD: &str = "STATUS";
pub const TYPE_FIELD: &str = "HYDRANTENTYP";
pub const DATE_FIELD: &str = "DATUM_INBETRIEBNAHME";
pub const TRANSACTION_ID_FIELD: &str = "TRANSAKTIONSID";
pub const PLAIN_ID_FIELD: &str = "ID";
pub const LOGICAL_ID_FIELD: &str = "LOGISCHE_ID";
pub const OPERATOR_FIELD: &str = "NUMMERIERUNGSBEZIRK";
/// Redundant legacy width columns; any subset may be filled per record.
pub const DIAMETER_FIELDS: [&str; 7] = [
    "NENNWEITE",
    "NENNWEITE1",
    "NENNWEITE2",
    "NENNWEITE3",
    "NENNWEITE4",
    "NENNWEITE5",
    "NENNWEITE6",
];

/// Domain literals the validators compare against. The default value matches
/// the EWK Kirchzarten dataset; tests substitute their own.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Required value of the numbering-authority field, reused as the
    /// `operator` tag.
    pub operator: String,
    /// When set, records whose STATUS differs are rejected.
    pub required_status: Option<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            operator: "EWK Kirchzarten".to_string(),
            required_status: Some("in Betrieb".to_string()),
        }
    }
}

/// One validated record: coordinates as their source decimal strings plus
/// the attribute bag verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedHydrant {
    pub latitude: String,
    pub longitude: String,
    pub attributes: HashMap<String, String>,
}

/// The OSM-tagged rendition of one hydrant, computed once per normalized
/// record and only consumed by the exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportHydrant {
    pub latitude: f64,
    pub longitude: f64,
    pub operator: String,
    pub reference: String,
    pub hydrant_type: HydrantType,
    pub diameter: Option<String>,
    pub start_year: Option<String>,
}

/// Validate one placemark and keep its fields verbatim. Pure over the single
/// record; the pipeline collects results so the first failure aborts the run.
pub fn normalize_feature(
    feature: &RawFeature,
    schema: &[SchemaField],
    rules: &ValidationRules,
) -> Result<NormalizedHydrant> {
    let point = coordinates::extract_coordinates(feature)?;
    let attributes = attributes::extract_attributes(feature, schema, rules)?;
    Ok(NormalizedHydrant {
        latitude: point.latitude,
        longitude: point.longitude,
        attributes,
    })
}

/// Map a validated record onto the tagged export form.
pub fn to_export(hydrant: &NormalizedHydrant, rules: &ValidationRules) -> Result<ExportHydrant> {
    let attr = |name: &str| hydrant.attributes.get(name).map(String::as_str);

    let operator = validate_operator(attr(OPERATOR_FIELD), rules)?;
    let reference = identity::cross_check_identity(
        attr(TRANSACTION_ID_FIELD),
        attr(PLAIN_ID_FIELD),
        attr(LOGICAL_ID_FIELD),
    )?;
    let hydrant_type = hydrant_type::map_hydrant_type(attr(TYPE_FIELD).unwrap_or_default())?;
    let diameter_candidates: Vec<&str> = DIAMETER_FIELDS
        .iter()
        .filter_map(|field| attr(field))
        .collect();
    let diameter = diameter::reconcile_diameter(&diameter_candidates)?;
    let start_year = start_date::extract_start_year(attr(DATE_FIELD))?;

    Ok(ExportHydrant {
        latitude: parse_axis(&hydrant.latitude, "latitude")?,
        longitude: parse_axis(&hydrant.longitude, "longitude")?,
        operator,
        reference,
        hydrant_type,
        diameter,
        start_year,
    })
}

fn validate_operator(value: Option<&str>, rules: &ValidationRules) -> Result<String> {
    match value {
        Some(value) if value == rules.operator => Ok(rules.operator.clone()),
        Some(value) => Err(NormalizeError::Validation(format!(
            "unexpected numbering authority '{}', expected '{}'",
            value, rules.operator
        ))),
        None => Err(NormalizeError::Validation(
            "numbering authority field is missing".to_string(),
        )),
    }
}

fn parse_axis(value: &str, axis: &str) -> Result<f64> {
    value.parse().map_err(|_| {
        NormalizeError::Format(format!("{} '{}' is not a decimal number", axis, value))
    })
}
