//! Coordinate Reference System handling

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate Reference System, identified by EPSG code.
///
/// The aggregation pipeline only ever moves coordinates between systems the
/// reprojector knows by code, so a bare EPSG integer is the whole identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CRS {
    epsg: u32,
}

impl CRS {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self { epsg: code }
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// NAD83 geographic CRS (EPSG:4269), the system US Census
    /// cartographic boundary layers are published in
    pub fn nad83() -> Self {
        Self::from_epsg(4269)
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self::from_epsg(3857)
    }

    /// UTM zone CRS: EPSG 326xx (North) or 327xx (South).
    ///
    /// Returns `None` for zones outside 1..=60.
    pub fn utm(zone: u32, north: bool) -> Option<Self> {
        if !(1..=60).contains(&zone) {
            return None;
        }
        let base = if north { 32600 } else { 32700 };
        Some(Self::from_epsg(base + zone))
    }

    /// Get the EPSG code
    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    /// Whether this is a geographic (degree-based) system
    pub fn is_geographic(&self) -> bool {
        matches!(self.epsg, 4326 | 4269)
    }

    /// Check if two CRS are the same system
    pub fn is_equivalent(&self, other: &CRS) -> bool {
        self.epsg == other.epsg
    }

    /// Get a string identifier for this CRS
    pub fn identifier(&self) -> String {
        format!("EPSG:{}", self.epsg)
    }
}

impl fmt::Display for CRS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl Default for CRS {
    fn default() -> Self {
        Self::wgs84()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crs_epsg() {
        let crs = CRS::from_epsg(4326);
        assert_eq!(crs.epsg(), 4326);
        assert_eq!(crs.identifier(), "EPSG:4326");
    }

    #[test]
    fn test_crs_equivalence() {
        let a = CRS::from_epsg(4326);
        let b = CRS::wgs84();
        assert!(a.is_equivalent(&b));
        assert!(!a.is_equivalent(&CRS::nad83()));
    }

    #[test]
    fn test_crs_utm() {
        assert_eq!(CRS::utm(30, true), Some(CRS::from_epsg(32630)));
        assert_eq!(CRS::utm(21, false), Some(CRS::from_epsg(32721)));
        assert_eq!(CRS::utm(0, true), None);
        assert_eq!(CRS::utm(61, false), None);
    }

    #[test]
    fn test_crs_geographic() {
        assert!(CRS::wgs84().is_geographic());
        assert!(CRS::nad83().is_geographic());
        assert!(!CRS::web_mercator().is_geographic());
    }
}
