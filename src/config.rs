use serde::Deserialize;
use std::path::PathBuf;

/// File locations for one conversion run, read from a YAML config file.
/// Either output may be left out to emit only the other format.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub kml_filepath: PathBuf,
    #[serde(default)]
    pub csv_filepath: Option<PathBuf>,
    #[serde(default)]
    pub geojson_filepath: Option<PathBuf>,
}
