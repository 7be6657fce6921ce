//! # Regionate Core
//!
//! Core types and I/O for the regionate boundary-aggregation library.
//!
//! This crate provides:
//! - `Feature` / `FeatureCollection`: the vector data model
//! - `GroupMapping` / `ExclusionSet`: classification configuration
//! - `CRS`: Coordinate Reference System handling
//! - Algorithm traits for consistent API
//! - GeoJSON I/O for the external interchange format

pub mod crs;
pub mod error;
pub mod io;
pub mod mapping;
pub mod vector;

pub use crs::CRS;
pub use error::{Error, Result};
pub use mapping::{ExclusionSet, GroupMapping};
pub use vector::{
    AttributeValue, Feature, FeatureCollection, LabeledCollection, LabeledFeature,
    RegionCollection, RegionFeature,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::mapping::{ExclusionSet, GroupMapping};
    pub use crate::vector::{
        AttributeValue, Feature, FeatureCollection, LabeledCollection, LabeledFeature,
        RegionCollection, RegionFeature,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in regionate.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
