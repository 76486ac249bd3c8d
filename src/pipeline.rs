use crate::config::Config;
use crate::error::Result as NormalizeResult;
use crate::export::{csv_file, geojson_file};
use crate::kml::reader::read_kml_document;
use crate::normalize::{self, ExportHydrant, NormalizedHydrant, ValidationRules};

/// Run the whole conversion: load the KML, normalize every placemark, export
/// the configured formats. The first invalid record aborts the run before any
/// output file is opened, so a failed run leaves nothing behind.
pub fn run(config: &Config, rules: &ValidationRules) -> anyhow::Result<()> {
    let document = read_kml_document(&config.kml_filepath)?;
    log::info!(
        "Read {} placemarks and {} schema fields from {:?}",
        document.features.len(),
        document.schema.len(),
        config.kml_filepath
    );

    let hydrants: NormalizeResult<Vec<NormalizedHydrant>> = document
        .features
        .iter()
        .map(|feature| normalize::normalize_feature(feature, &document.schema, rules))
        .collect();
    let hydrants = hydrants?;

    // The tag-mapping validators only run when the tagged output is wanted.
    let export_hydrants = match &config.geojson_filepath {
        Some(_) => {
            let export_hydrants: NormalizeResult<Vec<ExportHydrant>> = hydrants
                .iter()
                .map(|hydrant| normalize::to_export(hydrant, rules))
                .collect();
            Some(export_hydrants?)
        }
        None => None,
    };

    if let Some(csv_filepath) = &config.csv_filepath {
        log::info!("Writing {} rows to {:?}", hydrants.len(), csv_filepath);
        csv_file::write_hydrants_to_csv(&hydrants, &document.schema, csv_filepath)?;
    }
    if let (Some(geojson_filepath), Some(export_hydrants)) =
        (&config.geojson_filepath, &export_hydrants)
    {
        log::info!(
            "Writing {} features to {:?}",
            export_hydrants.len(),
            geojson_filepath
        );
        geojson_file::write_hydrants_to_geojson(export_hydrants, geojson_filepath)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::config::Config;
    use crate::normalize::ValidationRules;
    use approx::assert_abs_diff_eq;
    use std::path::Path;
    use testdir::testdir;

    fn hydrant_kml(status: &str) -> String {
        format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Schema name="hydranten" id="hydranten">
      <SimpleField name="STATUS" type="string"/>
      <SimpleField name="HYDRANTENTYP" type="string"/>
      <SimpleField name="NENNWEITE" type="float"/>
      <SimpleField name="NENNWEITE1" type="float"/>
      <SimpleField name="DATUM_INBETRIEBNAHME" type="string"/>
      <SimpleField name="TRANSAKTIONSID" type="string"/>
      <SimpleField name="ID" type="string"/>
      <SimpleField name="LOGISCHE_ID" type="string"/>
      <SimpleField name="NUMMERIERUNGSBEZIRK" type="string"/>
    </Schema>
    <Folder>
      <Placemark>
        <Point><coordinates>7.956886,47.961595</coordinates></Point>
        <ExtendedData>
          <SchemaData schemaUrl="#hydranten">
            <SimpleData name="STATUS">{status}</SimpleData>
            <SimpleData name="HYDRANTENTYP">Unterflurhydrant</SimpleData>
            <SimpleData name="NENNWEITE">100</SimpleData>
            <SimpleData name="NENNWEITE1">102</SimpleData>
            <SimpleData name="DATUM_INBETRIEBNAHME">2015/01/01</SimpleData>
            <SimpleData name="TRANSAKTIONSID">42</SimpleData>
            <SimpleData name="ID">42</SimpleData>
            <SimpleData name="LOGISCHE_ID">ID-42</SimpleData>
            <SimpleData name="NUMMERIERUNGSBEZIRK">EWK Kirchzarten</SimpleData>
          </SchemaData>
        </ExtendedData>
      </Placemark>
    </Folder>
  </Document>
</kml>"##
        )
    }

    fn test_config(test_dir: &Path) -> Config {
        Config {
            kml_filepath: test_dir.join("hydranten.kml"),
            csv_filepath: Some(test_dir.join("hydranten.csv")),
            geojson_filepath: Some(test_dir.join("hydranten.geojson")),
        }
    }

    #[test]
    fn test_one_valid_record_produces_one_row_and_one_feature() {
        let test_dir = testdir!();
        let config = test_config(&test_dir);
        std::fs::write(&config.kml_filepath, hydrant_kml("in Betrieb")).unwrap();

        run(&config, &ValidationRules::default()).unwrap();

        let csv_filepath = config.csv_filepath.as_ref().unwrap();
        let csv_contents = std::fs::read_to_string(csv_filepath).unwrap();
        let lines: Vec<&str> = csv_contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("latitude,longitude,STATUS (string)"));
        assert!(lines[1].starts_with("47.961595,7.956886,in Betrieb"));

        let geojson_filepath = config.geojson_filepath.as_ref().unwrap();
        let geojson_contents = std::fs::read_to_string(geojson_filepath).unwrap();
        let geojson: geojson::GeoJson = geojson_contents.parse().unwrap();
        let feature_collection = match geojson {
            geojson::GeoJson::FeatureCollection(feature_collection) => feature_collection,
            other => panic!("Expected a feature collection, got {:?}", other),
        };
        assert_eq!(feature_collection.features.len(), 1);

        let feature = &feature_collection.features[0];
        match &feature.geometry.as_ref().unwrap().value {
            geojson::Value::Point(coordinates) => {
                assert_abs_diff_eq!(coordinates[0], 7.956886);
                assert_abs_diff_eq!(coordinates[1], 47.961595);
            }
            other => panic!("Expected a point geometry, got {:?}", other),
        }
        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties["emergency"], "fire_hydrant");
        assert_eq!(properties["ref"], "42");
        assert_eq!(properties["fire_hydrant:diameter"], "100");
        assert_eq!(properties["start_date"], "2015");
    }

    #[test]
    fn test_one_bad_record_aborts_with_no_output() {
        let test_dir = testdir!();
        let config = test_config(&test_dir);
        std::fs::write(&config.kml_filepath, hydrant_kml("ausser Betrieb")).unwrap();

        assert!(run(&config, &ValidationRules::default()).is_err());
        assert!(!config.csv_filepath.as_ref().unwrap().exists());
        assert!(!config.geojson_filepath.as_ref().unwrap().exists());
    }

    #[test]
    fn test_status_policy_is_configuration() {
        let test_dir = testdir!();
        let config = test_config(&test_dir);
        std::fs::write(&config.kml_filepath, hydrant_kml("ausser Betrieb")).unwrap();

        let rules = ValidationRules {
            required_status: None,
            ..ValidationRules::default()
        };
        run(&config, &rules).unwrap();
        assert!(config.csv_filepath.as_ref().unwrap().exists());
        assert!(config.geojson_filepath.as_ref().unwrap().exists());
    }

    #[test]
    fn test_csv_only_run_skips_the_tagged_export() {
        let test_dir = testdir!();
        let mut config = test_config(&test_dir);
        config.geojson_filepath = None;
        // An unknown hydrant type only matters to the tagged export.
        let kml = hydrant_kml("in Betrieb").replace("Unterflurhydrant", "Standrohr");
        std::fs::write(&config.kml_filepath, kml).unwrap();

        run(&config, &ValidationRules::default()).unwrap();
        assert!(config.csv_filepath.as_ref().unwrap().exists());
    }
}
