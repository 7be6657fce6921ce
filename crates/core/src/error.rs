//! Error types for regionate
//!
//! Classification and aggregation never partially apply: a failure
//! enumerates every offending code or group, not just the first.

use thiserror::Error;

/// Main error type for regionate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GeoJSON: {reason}")]
    InvalidGeoJson { reason: String },

    #[error("unsupported geometry type: {0} (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry(String),

    #[error("feature {index} has no \"{field}\" property to use as identifier")]
    MissingIdentifier { index: usize, field: String },

    #[error("no group assignment for: {}", .codes.join(", "))]
    MappingIncomplete { codes: Vec<String> },

    #[error("union produced invalid or empty geometry for: {}", .failed.join(", "))]
    GeometryUnion { failed: Vec<String> },

    #[error("source reference system is undeclared; reprojection is undefined")]
    MissingSourceCrs,

    #[error("unsupported reference system: {0}")]
    UnsupportedCrs(String),
}

/// Result type alias for regionate operations
pub type Result<T> = std::result::Result<T, Error>;
