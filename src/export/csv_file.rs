use crate::kml::reader::SchemaField;
use crate::normalize::NormalizedHydrant;
use std::path::Path;

/// Write the review table: latitude and longitude first, then one column per
/// declared schema field labeled `"<name> (<type>)"`, values verbatim and in
/// schema order.
pub fn write_hydrants_to_csv(
    hydrants: &[NormalizedHydrant],
    schema: &[SchemaField],
    output_filepath: &Path,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(output_filepath)?;

    let mut header = vec!["latitude".to_string(), "longitude".to_string()];
    header.extend(
        schema
            .iter()
            .map(|field| format!("{} ({})", field.name, field.type_tag)),
    );
    writer.write_record(&header)?;

    for hydrant in hydrants {
        let mut row = vec![hydrant.latitude.clone(), hydrant.longitude.clone()];
        row.extend(schema.iter().map(|field| {
            hydrant
                .attributes
                .get(&field.name)
                .cloned()
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
