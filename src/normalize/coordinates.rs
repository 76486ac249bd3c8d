use crate::error::{NormalizeError, Result};
use crate::kml::reader::RawFeature;
use regex::Regex;
use std::sync::LazyLock;

// Exactly one decimal point per component, no sign, no exponent.
static COORDINATES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+),(\d+\.\d+)$").expect("valid coordinates regex"));

/// A point location with both axes kept as their source decimal strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointCoordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Extract the single point of a placemark.
///
/// KML writes `<coordinates>` as `lon,lat`: the first component is taken as
/// longitude and the second as latitude, here and everywhere downstream.
pub fn extract_coordinates(feature: &RawFeature) -> Result<PointCoordinates> {
    let coordinates = match feature.points.as_slice() {
        [] => {
            return Err(NormalizeError::Structural(
                "hydrant has no point".to_string(),
            ))
        }
        [single] => single,
        _ => {
            return Err(NormalizeError::Structural(format!(
                "hydrant has {} points, expected exactly one",
                feature.points.len()
            )))
        }
    };
    if coordinates.is_empty() {
        return Err(NormalizeError::Structural(
            "hydrant point has no coordinates".to_string(),
        ));
    }

    let captures = COORDINATES_RE.captures(coordinates).ok_or_else(|| {
        NormalizeError::Format(format!(
            "hydrant point coordinates '{}' invalid",
            coordinates
        ))
    })?;
    Ok(PointCoordinates {
        longitude: captures[1].to_string(),
        latitude: captures[2].to_string(),
    })
}
