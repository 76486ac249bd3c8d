use anyhow::anyhow;
use quick_xml::events::{BytesStart, Event};
use std::{fs::read_to_string, path::Path};

/// One declared field of the KML `Schema`, used to label CSV columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub type_tag: String,
}

/// One entry of a placemark's extended data, kept verbatim. The name may be
/// empty when the source omits it; the normalizer rejects that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
}

/// One placemark, as raw as the XML allows: every point's coordinate string
/// verbatim, and an attribute bag only if an extended-data block was present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeature {
    pub points: Vec<String>,
    pub attributes: Option<Vec<RawAttribute>>,
}

/// The parts of a hydrant KML document the pipeline consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmlDocument {
    pub schema: Vec<SchemaField>,
    pub features: Vec<RawFeature>,
}

pub fn read_kml_document(filepath: &Path) -> anyhow::Result<KmlDocument> {
    let contents = read_to_string(filepath)?;
    parse_kml_document(&contents)
}

/// Parse `Document > Schema > SimpleField` declarations and
/// `Folder > Placemark` features with their `ExtendedData > SchemaData >
/// SimpleData` entries. No validation happens here; malformed placemarks are
/// preserved as-is so the normalizer can report them.
pub fn parse_kml_document(xml: &str) -> anyhow::Result<KmlDocument> {
    let mut schema = Vec::new();
    let mut features = Vec::new();

    let mut in_schema = false;
    let mut in_coordinates = false;
    let mut current_feature: Option<RawFeature> = None;
    let mut current_point: Option<String> = None;
    let mut current_attribute: Option<RawAttribute> = None;

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"Schema" => in_schema = true,
                b"SimpleField" if in_schema => schema.push(read_schema_field(e)),
                b"Placemark" => current_feature = Some(RawFeature::default()),
                b"Point" if current_feature.is_some() => current_point = Some(String::new()),
                b"coordinates" if current_point.is_some() => in_coordinates = true,
                b"SchemaData" => {
                    if let Some(feature) = current_feature.as_mut() {
                        feature.attributes.get_or_insert_with(Vec::new);
                    }
                }
                b"SimpleData" if current_feature.is_some() => {
                    current_attribute = Some(RawAttribute {
                        name: attribute_value(e, b"name"),
                        value: String::new(),
                    });
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"SimpleField" if in_schema => schema.push(read_schema_field(e)),
                b"Point" => {
                    if let Some(feature) = current_feature.as_mut() {
                        feature.points.push(String::new());
                    }
                }
                b"SimpleData" => {
                    if let Some(feature) = current_feature.as_mut() {
                        feature
                            .attributes
                            .get_or_insert_with(Vec::new)
                            .push(RawAttribute {
                                name: attribute_value(e, b"name"),
                                value: String::new(),
                            });
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                let text = e.unescape()?;
                if in_coordinates {
                    if let Some(point) = current_point.as_mut() {
                        point.push_str(&text);
                    }
                } else if let Some(attribute) = current_attribute.as_mut() {
                    attribute.value.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"Schema" => in_schema = false,
                b"coordinates" => in_coordinates = false,
                b"Point" => {
                    if let (Some(feature), Some(point)) =
                        (current_feature.as_mut(), current_point.take())
                    {
                        feature.points.push(point);
                    }
                }
                b"SimpleData" => {
                    if let (Some(feature), Some(attribute)) =
                        (current_feature.as_mut(), current_attribute.take())
                    {
                        feature
                            .attributes
                            .get_or_insert_with(Vec::new)
                            .push(attribute);
                    }
                }
                b"Placemark" => {
                    if let Some(feature) = current_feature.take() {
                        features.push(feature);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow!(
                    "KML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(KmlDocument { schema, features })
}

fn attribute_value(element: &BytesStart, key: &[u8]) -> String {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
        .unwrap_or_default()
}

fn read_schema_field(element: &BytesStart) -> SchemaField {
    SchemaField {
        name: attribute_value(element, b"name"),
        type_tag: attribute_value(element, b"type"),
    }
}
