use crate::normalize::ExportHydrant;
use std::{fs, io, path::Path};

fn hydrant_to_feature(hydrant: &ExportHydrant) -> geojson::Feature {
    let point = geo::Point::new(hydrant.longitude, hydrant.latitude);

    let mut properties = serde_json::Map::new();
    properties.insert("emergency".to_string(), "fire_hydrant".into());
    properties.insert("operator".to_string(), hydrant.operator.clone().into());
    properties.insert("ref".to_string(), hydrant.reference.clone().into());
    properties.insert(
        "fire_hydrant:type".to_string(),
        hydrant.hydrant_type.tag_value().into(),
    );
    // Absent values are omitted, not serialized as null.
    if let Some(diameter) = &hydrant.diameter {
        properties.insert("fire_hydrant:diameter".to_string(), diameter.clone().into());
    }
    if let Some(start_year) = &hydrant.start_year {
        properties.insert("start_date".to_string(), start_year.clone().into());
    }

    geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn write_hydrants_to_geojson(
    hydrants: &[ExportHydrant],
    output_filepath: &Path,
) -> io::Result<()> {
    let feature_collection: geojson::FeatureCollection =
        hydrants.iter().map(hydrant_to_feature).collect();
    let geojson_contents: geojson::GeoJson = geojson::GeoJson::from(feature_collection);
    fs::write(output_filepath, geojson_contents.to_string())
}
