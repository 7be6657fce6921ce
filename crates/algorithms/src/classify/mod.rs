//! Feature classification
//!
//! Assigns each input feature a group label from an explicit mapping:
//! a silent exclusion filter, then an exhaustiveness check over
//! everything that remains, then label assignment.

pub mod presets;

use regionate_core::{
    Algorithm, Error, ExclusionSet, FeatureCollection, GroupMapping, LabeledCollection,
    LabeledFeature, Result,
};

/// Parameters for classification
#[derive(Debug, Clone, Default)]
pub struct ClassifyParams {
    /// Mapping from feature code to group label; must cover every
    /// non-excluded code in the input
    pub mapping: GroupMapping,
    /// Codes dropped, silently, before the mapping is checked
    pub exclusions: ExclusionSet,
}

/// Classification algorithm
#[derive(Debug, Clone, Default)]
pub struct Classify;

impl Algorithm for Classify {
    type Input = FeatureCollection;
    type Output = LabeledCollection;
    type Params = ClassifyParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Classify"
    }

    fn description(&self) -> &'static str {
        "Assign each feature a group label from an explicit, exhaustive mapping"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        classify(input, params)
    }
}

/// Classify features into groups.
///
/// Features whose code is in `params.exclusions` are dropped without
/// error. Every remaining code must resolve in `params.mapping`;
/// otherwise the call fails with [`Error::MappingIncomplete`] listing
/// every unmapped code in one report, and no output is produced.
///
/// Pure over its inputs. An input that is empty after filtering yields
/// an empty collection. Output order follows input order, but callers
/// must not rely on it; downstream grouping is order-independent.
pub fn classify(features: FeatureCollection, params: ClassifyParams) -> Result<LabeledCollection> {
    let crs = features.crs;

    let mut labeled = Vec::with_capacity(features.len());
    let mut unmapped: Vec<String> = Vec::new();

    for feature in features {
        if params.exclusions.contains(&feature.code) {
            continue;
        }
        match params.mapping.get(&feature.code) {
            Some(label) => labeled.push(LabeledFeature::new(label, feature)),
            None => unmapped.push(feature.code),
        }
    }

    if !unmapped.is_empty() {
        unmapped.sort();
        unmapped.dedup();
        return Err(Error::MappingIncomplete { codes: unmapped });
    }

    Ok(LabeledCollection {
        features: labeled,
        crs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, Geometry};
    use regionate_core::{Feature, CRS};

    fn square() -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ])
    }

    fn collection(codes: &[&str]) -> FeatureCollection {
        let mut collection = FeatureCollection::with_crs(CRS::nad83());
        for code in codes {
            collection.push(Feature::new(*code, square()));
        }
        collection
    }

    fn mapping() -> GroupMapping {
        [("CA", "Far West"), ("NV", "Far West"), ("TX", "Southwest")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_classify_assigns_labels() {
        let params = ClassifyParams {
            mapping: mapping(),
            exclusions: ExclusionSet::new(),
        };
        let labeled = classify(collection(&["CA", "TX"]), params).unwrap();

        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled.features[0].label(), "Far West");
        assert_eq!(labeled.features[1].label(), "Southwest");
        assert_eq!(labeled.crs, Some(CRS::nad83()));
    }

    #[test]
    fn test_classify_filters_exclusions_silently() {
        let params = ClassifyParams {
            mapping: mapping(),
            // "PR" has no mapping entry, but exclusion wins
            exclusions: ["PR"].into_iter().collect(),
        };
        let labeled = classify(collection(&["CA", "PR"]), params).unwrap();

        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled.features[0].feature().code, "CA");
    }

    #[test]
    fn test_classify_reports_all_unmapped_codes() {
        let params = ClassifyParams {
            mapping: mapping(),
            exclusions: ExclusionSet::new(),
        };
        let err = classify(collection(&["ZZ", "CA", "YY"]), params).unwrap_err();

        match err {
            Error::MappingIncomplete { codes } => {
                assert_eq!(codes, vec!["YY".to_string(), "ZZ".to_string()]);
            }
            other => panic!("expected MappingIncomplete, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_single_missing_code() {
        let params = ClassifyParams {
            mapping: mapping(),
            exclusions: ExclusionSet::new(),
        };
        let err = classify(collection(&["CA", "ZZ"]), params).unwrap_err();

        match err {
            Error::MappingIncomplete { codes } => assert_eq!(codes, vec!["ZZ".to_string()]),
            other => panic!("expected MappingIncomplete, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_empty_after_filter_is_ok() {
        let params = ClassifyParams {
            mapping: mapping(),
            exclusions: ["PR", "GU"].into_iter().collect(),
        };
        let labeled = classify(collection(&["PR", "GU"]), params).unwrap();
        assert!(labeled.is_empty());
    }

    #[test]
    fn test_classify_empty_input_is_ok() {
        let labeled = classify(FeatureCollection::new(), ClassifyParams::default()).unwrap();
        assert!(labeled.is_empty());
    }
}
