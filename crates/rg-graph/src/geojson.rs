//! GeoJSON → [`LineFeature`] conversion.
//!
//! | Geometry          | Result                                            |
//! |-------------------|---------------------------------------------------|
//! | `LineString`      | one feature                                       |
//! | `MultiLineString` | one feature per part                              |
//! | `Polygon`         | exterior ring as a one-way feature, in ring order |
//! | anything else     | skipped, with a reason                            |
//!
//! Properties map onto [`Attributes`]: `oneway` (bool, or the strings
//! `yes`/`true`/`1`), `cost` (number or numeric string), `highway`
//! (string).  Every other scalar property is kept as a string tag.  A
//! `cost` or `oneway` of an unusable type keeps the default and is reported
//! as a [`PropertyIssue`].

use ::geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};

use rg_core::feature::parse_oneway;
use rg_core::{Attributes, Coord, LineFeature};

/// A GeoJSON feature that produced no line features.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedGeometry {
    /// Position of the feature in the input document.
    pub index:  usize,
    pub reason: String,
}

/// A property that was present but unusable.  The feature is still
/// imported, with the default for that attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyIssue {
    /// Position of the feature in the input document.
    pub index:  usize,
    pub key:    String,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct GeoJsonImport {
    pub features: Vec<LineFeature>,
    pub skipped:  Vec<SkippedGeometry>,
    pub issues:   Vec<PropertyIssue>,
}

/// Convert a whole document.  A bare `Geometry` or `Feature` counts as a
/// one-element collection.
pub fn features_from_geojson(doc: &GeoJson) -> GeoJsonImport {
    let mut out = GeoJsonImport::default();
    match doc {
        GeoJson::FeatureCollection(fc) => {
            for (index, feature) in fc.features.iter().enumerate() {
                push_feature(&mut out, index, feature);
            }
        }
        GeoJson::Feature(feature) => push_feature(&mut out, 0, feature),
        GeoJson::Geometry(geometry) => push_geometry(&mut out, 0, geometry, &Attributes::default()),
    }
    if !out.skipped.is_empty() {
        log::debug!("geojson: skipped {} non-line feature(s)", out.skipped.len());
    }
    for issue in &out.issues {
        log::warn!("geojson: feature {} property `{}`: {}", issue.index, issue.key, issue.reason);
    }
    out
}

/// Map the property object of feature `index` onto [`Attributes`], along
/// with any properties that had to fall back to their default.
pub fn attributes_from_properties(
    index: usize,
    props: Option<&JsonObject>,
) -> (Attributes, Vec<PropertyIssue>) {
    let mut attrs = Attributes::default();
    let mut issues = Vec::new();
    let Some(props) = props else {
        return (attrs, issues);
    };
    let mut reject = |key: &str, reason: String| {
        issues.push(PropertyIssue { index, key: key.to_owned(), reason });
    };
    for (key, value) in props {
        match key.as_str() {
            "oneway" => {
                attrs.oneway = match value {
                    JsonValue::Bool(b) => *b,
                    JsonValue::String(s) => parse_oneway(s),
                    JsonValue::Number(n) => n.as_f64() == Some(1.0),
                    JsonValue::Null => false,
                    other => {
                        reject(key.as_str(), format!("{} is not a flag, treating as two-way", json_type(other)));
                        false
                    }
                };
            }
            "cost" => match value {
                JsonValue::Null => {}
                JsonValue::Number(n) => attrs.cost = n.as_f64(),
                JsonValue::String(s) => match s.trim().parse::<f64>() {
                    Ok(cost) => attrs.cost = Some(cost),
                    Err(_) => reject(key.as_str(), format!("{s:?} is not a number, using the default cost")),
                },
                other => reject(key.as_str(), format!("{} is not a number, using the default cost", json_type(other))),
            },
            "highway" => attrs.highway = value.as_str().map(str::to_owned),
            _ => {
                if let Some(text) = scalar_text(value) {
                    attrs.tags.insert(key.clone(), text);
                }
            }
        }
    }
    (attrs, issues)
}

fn push_feature(out: &mut GeoJsonImport, index: usize, feature: &Feature) {
    let (attrs, issues) = attributes_from_properties(index, feature.properties.as_ref());
    out.issues.extend(issues);
    match &feature.geometry {
        Some(geometry) => push_geometry(out, index, geometry, &attrs),
        None => out.skipped.push(SkippedGeometry { index, reason: "feature has no geometry".into() }),
    }
}

fn push_geometry(out: &mut GeoJsonImport, index: usize, geometry: &Geometry, attrs: &Attributes) {
    match &geometry.value {
        Value::LineString(line) => {
            out.features.push(LineFeature::new(to_coords(line), attrs.clone()));
        }
        Value::MultiLineString(lines) => {
            for line in lines {
                out.features.push(LineFeature::new(to_coords(line), attrs.clone()));
            }
        }
        Value::Polygon(rings) => match rings.first() {
            Some(exterior) => {
                let mut ring_attrs = attrs.clone();
                ring_attrs.oneway = true;
                out.features.push(LineFeature::new(to_coords(exterior), ring_attrs));
            }
            None => out.skipped.push(SkippedGeometry { index, reason: "polygon has no rings".into() }),
        },
        other => out.skipped.push(SkippedGeometry {
            index,
            reason: format!("unsupported geometry type {}", type_name(other)),
        }),
    }
}

/// Positions with fewer than two values become NaN coordinates, which the
/// builder then rejects as invalid geometry.
fn to_coords(positions: &[Vec<f64>]) -> Vec<Coord> {
    positions
        .iter()
        .map(|p| match p.as_slice() {
            [lon, lat, ..] => Coord::new(*lon, *lat),
            _ => Coord::new(f64::NAN, f64::NAN),
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
