//! GeoJSON FeatureCollection reading and writing
//!
//! Decodes straight from `serde_json` structures; only Polygon and
//! MultiPolygon geometries are accepted, which is what cartographic
//! boundary layers contain.
//!
//! RFC 7946 dropped the `crs` member, but the Census-era files this
//! library consumes still carry the legacy name form; the reader honors
//! `EPSG::<code>` and `CRS84` URNs and leaves the declaration empty for
//! anything else.

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::vector::{AttributeValue, Feature, FeatureCollection, RegionCollection};
use geo_types::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// ── Reading ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    crs: Option<RawCrs>,
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawCrs {
    #[serde(default)]
    properties: Option<RawCrsProperties>,
}

#[derive(Deserialize)]
struct RawCrsProperties {
    name: String,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Value,
}

/// Read a GeoJSON FeatureCollection from a file.
///
/// `id_field` names the property holding each feature's identifying code
/// (e.g. `"STUSPS"` for Census state layers).
pub fn read_geojson<P: AsRef<Path>>(path: P, id_field: &str) -> Result<FeatureCollection> {
    let file = File::open(path.as_ref())?;
    let raw: RawCollection = serde_json::from_reader(BufReader::new(file))?;
    decode_collection(raw, id_field)
}

/// Read a GeoJSON FeatureCollection from an in-memory buffer.
///
/// Same as `read_geojson` but operates on bytes instead of a file path.
pub fn read_geojson_from_buffer(data: &[u8], id_field: &str) -> Result<FeatureCollection> {
    let raw: RawCollection = serde_json::from_slice(data)?;
    decode_collection(raw, id_field)
}

fn decode_collection(raw: RawCollection, id_field: &str) -> Result<FeatureCollection> {
    if raw.kind != "FeatureCollection" {
        return Err(Error::InvalidGeoJson {
            reason: format!("expected FeatureCollection, got {}", raw.kind),
        });
    }

    let mut collection = FeatureCollection::new();
    collection.crs = raw
        .crs
        .and_then(|c| c.properties)
        .and_then(|p| parse_crs_name(&p.name));

    for (index, raw_feature) in raw.features.into_iter().enumerate() {
        let raw_geometry = raw_feature.geometry.ok_or_else(|| Error::InvalidGeoJson {
            reason: format!("feature {index} has null geometry"),
        })?;
        let geometry = decode_geometry(raw_geometry)?;

        let properties = raw_feature.properties.unwrap_or_default();
        let code = properties
            .get(id_field)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::MissingIdentifier {
                index,
                field: id_field.to_string(),
            })?;

        let mut feature = Feature::new(code, geometry);
        for (key, value) in properties {
            feature.properties.insert(key, decode_value(value));
        }
        collection.push(feature);
    }

    Ok(collection)
}

/// Parse a legacy `crs` member name into a CRS.
///
/// Recognized forms: `urn:ogc:def:crs:EPSG::4269`, `EPSG:4269`, and the
/// `urn:ogc:def:crs:OGC:1.3:CRS84` spelling of WGS84.
fn parse_crs_name(name: &str) -> Option<CRS> {
    if name.ends_with("CRS84") {
        return Some(CRS::wgs84());
    }
    name.rsplit(':')
        .next()
        .and_then(|code| code.parse::<u32>().ok())
        .map(CRS::from_epsg)
}

fn decode_geometry(raw: RawGeometry) -> Result<Geometry<f64>> {
    match raw.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(raw.coordinates)?;
            Ok(Geometry::Polygon(decode_polygon(rings)?))
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(raw.coordinates)?;
            let polygons = polygons
                .into_iter()
                .map(decode_polygon)
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon(polygons)))
        }
        other => Err(Error::UnsupportedGeometry(other.to_string())),
    }
}

fn decode_polygon(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter();
    let exterior = rings.next().ok_or_else(|| Error::InvalidGeoJson {
        reason: "polygon with no rings".to_string(),
    })?;
    Ok(Polygon::new(
        decode_ring(exterior)?,
        rings.map(decode_ring).collect::<Result<Vec<_>>>()?,
    ))
}

fn decode_ring(positions: Vec<Vec<f64>>) -> Result<LineString<f64>> {
    positions
        .into_iter()
        .map(|position| {
            // Positions may carry a third (elevation) element; ignore it.
            if position.len() < 2 {
                return Err(Error::InvalidGeoJson {
                    reason: format!("position with {} coordinates", position.len()),
                });
            }
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn decode_value(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => AttributeValue::Int(i),
            None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => AttributeValue::String(s),
        // Nested arrays/objects are carried as their JSON text
        other => AttributeValue::String(other.to_string()),
    }
}

// ── Writing ──────────────────────────────────────────────────────────────

/// Write a region collection to a file as a GeoJSON FeatureCollection.
///
/// Each region's label is written under `label_field` alongside its
/// collapsed attributes.
pub fn write_geojson<P: AsRef<Path>>(
    path: P,
    regions: &RegionCollection,
    label_field: &str,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &encode_collection(regions, label_field))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Serialize a region collection to GeoJSON bytes.
pub fn write_geojson_to_buffer(regions: &RegionCollection, label_field: &str) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&encode_collection(
        regions,
        label_field,
    ))?)
}

fn encode_collection(regions: &RegionCollection, label_field: &str) -> Value {
    let features: Vec<Value> = regions
        .iter()
        .map(|region| {
            let mut properties = Map::new();
            properties.insert(
                label_field.to_string(),
                Value::String(region.label.clone()),
            );
            for (key, value) in &region.properties {
                if key != label_field {
                    properties.insert(key.clone(), encode_value(value));
                }
            }
            json!({
                "type": "Feature",
                "properties": properties,
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": encode_multipolygon(&region.geometry),
                },
            })
        })
        .collect();

    // RFC 7946 output carries no crs member for WGS84; anything else gets
    // the legacy EPSG URN so downstream readers see the declaration.
    if regions.crs == CRS::wgs84() {
        json!({ "type": "FeatureCollection", "features": features })
    } else {
        json!({
            "type": "FeatureCollection",
            "crs": {
                "type": "name",
                "properties": { "name": format!("urn:ogc:def:crs:EPSG::{}", regions.crs.epsg()) },
            },
            "features": features,
        })
    }
}

fn encode_multipolygon(multipolygon: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<Value> = multipolygon
        .0
        .iter()
        .map(|polygon| {
            let rings: Vec<Value> = std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(encode_ring)
                .collect();
            Value::Array(rings)
        })
        .collect();
    Value::Array(polygons)
}

fn encode_ring(ring: &LineString<f64>) -> Value {
    Value::Array(
        ring.0
            .iter()
            .map(|coord| json!([coord.x, coord.y]))
            .collect(),
    )
}

fn encode_value(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Null => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Int(i) => json!(i),
        AttributeValue::Float(f) => json!(f),
        AttributeValue::String(s) => Value::String(s.clone()),
    }
}
