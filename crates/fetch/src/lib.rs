//! # Regionate Fetch
//!
//! Thin fetch-and-extract collaborator for regionate: download a
//! boundary layer over HTTP, unpack it, and decode it into the core
//! feature model. Retries and timeouts live here; the aggregation core
//! never retries.

pub mod archive;
pub mod error;
pub mod http;
pub mod source;

pub use error::{FetchError, Result};
pub use http::HttpClient;
pub use source::{census_boundary_url, fetch_boundaries};

/// Blocking API re-exported as `blocking` module.
pub mod blocking {
    pub use crate::source::blocking::*;
}
