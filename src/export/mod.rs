pub mod csv_file;
pub mod geojson_file;
