//! Boundary layer retrieval: download, unpack, decode.

use crate::archive;
use crate::error::Result;
use crate::http::HttpClient;
use regionate_core::io::read_geojson_from_buffer;
use regionate_core::FeatureCollection;
use std::time::Duration;
use tracing::info;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default retry budget for transient failures.
const DEFAULT_RETRIES: u32 = 3;

/// Build the URL of a Census cartographic boundary state layer.
///
/// `scale` is the generalization level, `"20m"` or `"5m"`.
pub fn census_boundary_url(year: u16, scale: &str) -> String {
    format!("https://www2.census.gov/geo/tiger/GENZ{year}/geojson/cb_{year}_us_state_{scale}.json")
}

/// Fetch a boundary layer and decode it into a feature collection.
///
/// `id_field` names the property used as each feature's code.
pub async fn fetch_boundaries(url: &str, id_field: &str) -> Result<FeatureCollection> {
    let client = HttpClient::new(DEFAULT_TIMEOUT, DEFAULT_RETRIES)?;

    info!(url, "downloading boundary layer");
    let payload = client.fetch(url).await?;
    let document = archive::unpack(&payload)?;
    let collection = read_geojson_from_buffer(&document, id_field)?;
    info!(features = collection.len(), "decoded boundary layer");

    Ok(collection)
}

/// Blocking wrappers for callers without an async runtime.
pub mod blocking {
    use super::*;
    use crate::error::FetchError;

    /// One-shot blocking fetch of a boundary layer.
    ///
    /// Uses an internal single-threaded Tokio runtime.
    pub fn fetch_boundaries(url: &str, id_field: &str) -> Result<FeatureCollection> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FetchError::Runtime(e.to_string()))?;

        rt.block_on(super::fetch_boundaries(url, id_field))
    }
}
