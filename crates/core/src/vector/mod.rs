//! Vector data model for the aggregation pipeline
//!
//! `Feature` and `FeatureCollection` mirror the external vector
//! interchange model (identifier + geometry + attributes, plus a
//! collection-level reference-system declaration). `LabeledFeature` and
//! `RegionFeature` are the intermediate and final products of the
//! classify → dissolve pipeline.

use crate::crs::CRS;
use geo_types::{Geometry, MultiPolygon};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// An input boundary feature.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Identifying code, unique within a collection (e.g. a postal
    /// abbreviation such as "CA")
    pub code: String,
    /// Polygon or MultiPolygon geometry in the collection's source CRS
    pub geometry: Geometry<f64>,
    /// Attributes carried through but not interpreted
    pub properties: HashMap<String, AttributeValue>,
}

impl Feature {
    /// Create a new feature with a code and geometry
    pub fn new(code: impl Into<String>, geometry: Geometry<f64>) -> Self {
        Self {
            code: code.into(),
            geometry,
            properties: HashMap::new(),
        }
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }
}

/// Collection of input features plus their declared reference system.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    /// Source CRS declaration; `None` when the origin did not declare one
    pub crs: Option<CRS>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crs(crs: CRS) -> Self {
        Self {
            features: Vec::new(),
            crs: Some(crs),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

/// A feature with its assigned group label.
///
/// Produced by classification and immutable from then on: fields are
/// private and there are no setters.
#[derive(Debug, Clone)]
pub struct LabeledFeature {
    label: String,
    feature: Feature,
}

impl LabeledFeature {
    pub fn new(label: impl Into<String>, feature: Feature) -> Self {
        Self {
            label: label.into(),
            feature,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    /// Consume self, returning label and feature
    pub fn into_parts(self) -> (String, Feature) {
        (self.label, self.feature)
    }
}

/// Labeled features still expressed in the source reference system.
#[derive(Debug, Clone, Default)]
pub struct LabeledCollection {
    pub features: Vec<LabeledFeature>,
    pub crs: Option<CRS>,
}

impl LabeledCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledFeature> {
        self.features.iter()
    }
}

/// One aggregated region: group label plus the unioned geometry of all
/// member features, in the collection's reference system.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    pub label: String,
    pub geometry: MultiPolygon<f64>,
    /// Attributes collapsed from one representative member
    pub properties: HashMap<String, AttributeValue>,
}

/// Final output collection; every geometry is expressed in `crs`.
#[derive(Debug, Clone)]
pub struct RegionCollection {
    pub regions: Vec<RegionFeature>,
    pub crs: CRS,
}

impl RegionCollection {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionFeature> {
        self.regions.iter()
    }
}
