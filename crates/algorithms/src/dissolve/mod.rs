//! Region aggregation: group, union, collapse, reproject
//!
//! Member geometries are unioned in the *source* reference system, where
//! the input was surveyed; reprojecting first and unioning second
//! introduces sliver artifacts along shared borders. Reprojection is the
//! last step and is applied uniformly to every output feature.

use crate::maybe_rayon::*;
use crate::reproject;
use geo::{unary_union, Validation};
use geo_types::{Geometry, MultiPolygon};
use regionate_core::{
    Algorithm, Error, Feature, LabeledCollection, RegionCollection, RegionFeature, Result, CRS,
};
use std::collections::BTreeMap;

/// Parameters for aggregation
#[derive(Debug, Clone)]
pub struct AggregateParams {
    /// Reference system of the output collection
    pub target_crs: CRS,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self {
            target_crs: CRS::wgs84(),
        }
    }
}

/// Aggregation algorithm
#[derive(Debug, Clone, Default)]
pub struct Aggregate;

impl Algorithm for Aggregate {
    type Input = LabeledCollection;
    type Output = RegionCollection;
    type Params = AggregateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Aggregate"
    }

    fn description(&self) -> &'static str {
        "Union each group's geometries into one region feature and reproject to the target system"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        aggregate(input, params)
    }
}

/// Aggregate labeled features into one region per group label.
///
/// Groups are derived from the labels present in the input, so there is
/// no notion of an empty group. Attributes collapse onto one
/// representative member per group (the lexicographically smallest code
/// — stable, but callers must not rely on which member is chosen).
///
/// # Errors
/// - [`Error::MissingSourceCrs`] when the input has no CRS declaration
/// - [`Error::UnsupportedCrs`] when either system has no known transform
/// - [`Error::GeometryUnion`] when any group unions to an invalid or
///   empty geometry; every failing group is listed
pub fn aggregate(labeled: LabeledCollection, params: AggregateParams) -> Result<RegionCollection> {
    let source_crs = labeled.crs.ok_or(Error::MissingSourceCrs)?;

    // Resolve the transform first so an unsupported system fails before
    // any union work is spent
    let transform = reproject::transform(source_crs, params.target_crs)?;

    // One group per label observed in the input, in label order
    let mut groups: BTreeMap<String, Vec<Feature>> = BTreeMap::new();
    for labeled_feature in labeled.features {
        let (label, feature) = labeled_feature.into_parts();
        groups.entry(label).or_default().push(feature);
    }

    // Each group's union is independent of every other group's
    let unioned: Vec<(String, std::result::Result<RegionFeature, String>)> = groups
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(label, members)| {
            let outcome = union_group(&label, members);
            (label, outcome)
        })
        .collect();

    let mut regions = Vec::with_capacity(unioned.len());
    let mut failed = Vec::new();
    for (label, outcome) in unioned {
        match outcome {
            Ok(region) => regions.push(region),
            Err(reason) => failed.push(format!("{label} ({reason})")),
        }
    }
    if !failed.is_empty() {
        return Err(Error::GeometryUnion { failed });
    }

    let regions = regions
        .into_iter()
        .map(|mut region| {
            region.geometry = transform.apply(&region.geometry);
            region
        })
        .collect();

    Ok(RegionCollection {
        regions,
        crs: params.target_crs,
    })
}

/// Union one group's member geometries, collapsing attributes onto the
/// representative member.
fn union_group(
    label: &str,
    mut members: Vec<Feature>,
) -> std::result::Result<RegionFeature, String> {
    members.sort_by(|a, b| a.code.cmp(&b.code));

    let mut parts: Vec<MultiPolygon<f64>> = Vec::with_capacity(members.len());
    for member in &members {
        match &member.geometry {
            Geometry::Polygon(polygon) => parts.push(MultiPolygon(vec![polygon.clone()])),
            Geometry::MultiPolygon(multipolygon) => parts.push(multipolygon.clone()),
            _ => return Err(format!("non-polygonal member {}", member.code)),
        }
    }

    let merged = unary_union(parts.iter());
    if merged.0.is_empty() {
        return Err("empty union".to_string());
    }
    if !merged.is_valid() {
        return Err("invalid union".to_string());
    }

    let properties = members
        .into_iter()
        .next()
        .map(|representative| representative.properties)
        .unwrap_or_default();

    Ok(RegionFeature {
        label: label.to_string(),
        geometry: merged,
        properties,
    })
}
