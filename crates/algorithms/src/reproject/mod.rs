//! Pure-Rust coordinate reprojection (Snyder 1987, USGS formulas).
//!
//! WGS84 geographic is the hub: every supported system converts to and
//! from it, so any supported pair composes. Covered systems:
//!
//! - EPSG:4326 (WGS84) and EPSG:4269 (NAD83 geographic — the datum
//!   shift is under two metres, zero at cartographic-boundary scale)
//! - EPSG:326xx / 327xx (UTM North / South)
//! - EPSG:3857 (Web Mercator)
//!
//! No external C dependencies (no libproj), so it works on WASM targets.

use geo::MapCoords;
use geo_types::{Coord, MultiPolygon};
use regionate_core::{Error, Result, CRS};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

// ── WGS84 ellipsoid constants ────────────────────────────────────────────

const A: f64 = 6_378_137.0; // semi-major axis (m)
const F: f64 = 1.0 / 298.257_223_563; // flattening
const E2: f64 = 2.0 * F - F * F; // eccentricity squared
const E_PRIME2: f64 = E2 / (1.0 - E2); // second eccentricity squared
const K0: f64 = 0.9996; // UTM scale factor
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

// ── Public API ───────────────────────────────────────────────────────────

/// A validated coordinate transform between two reference systems.
///
/// Constructing one proves both legs are supported, so applying it never
/// fails; build the transform before doing geometry work to surface
/// reprojection errors early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    source: Projection,
    target: Projection,
}

/// Build the transform taking coordinates from `from` into `to`.
///
/// Fails with [`Error::UnsupportedCrs`] when either system is outside
/// the supported set.
pub fn transform(from: CRS, to: CRS) -> Result<Transform> {
    Ok(Transform {
        source: projection_for(from)?,
        target: projection_for(to)?,
    })
}

impl Transform {
    /// Whether source and target resolve to the same projection
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }

    /// Transform a single coordinate
    pub fn apply_coord(&self, coord: Coord<f64>) -> Coord<f64> {
        if self.is_identity() {
            return coord;
        }
        let (lon, lat) = self.source.to_wgs84(coord.x, coord.y);
        let (x, y) = self.target.from_wgs84(lon, lat);
        Coord { x, y }
    }

    /// Transform every coordinate of a multipolygon
    pub fn apply(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        if self.is_identity() {
            return geometry.clone();
        }
        let transform = *self;
        geometry.map_coords(move |coord| transform.apply_coord(coord))
    }
}

/// One leg of a transform: a supported projected or geographic system.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Projection {
    /// Geographic degrees (WGS84 or NAD83)
    Geographic,
    Utm { zone: u32, north: bool },
    WebMercator,
}

fn projection_for(crs: CRS) -> Result<Projection> {
    if crs.is_geographic() {
        return Ok(Projection::Geographic);
    }
    if let Some((zone, north)) = parse_utm_epsg(crs.epsg()) {
        return Ok(Projection::Utm { zone, north });
    }
    if crs.epsg() == 3857 {
        return Ok(Projection::WebMercator);
    }
    Err(Error::UnsupportedCrs(crs.identifier()))
}

/// Parse an EPSG code into UTM zone info: `Some((zone, is_north))`.
///
/// - EPSG 326xx → zone xx, North hemisphere
/// - EPSG 327xx → zone xx, South hemisphere
pub fn parse_utm_epsg(epsg: u32) -> Option<(u32, bool)> {
    if (32601..=32660).contains(&epsg) {
        Some((epsg - 32600, true))
    } else if (32701..=32760).contains(&epsg) {
        Some((epsg - 32700, false))
    } else {
        None
    }
}

impl Projection {
    fn to_wgs84(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::Geographic => (x, y),
            Projection::Utm { zone, north } => utm_to_wgs84(x, y, zone, north),
            Projection::WebMercator => web_mercator_to_wgs84(x, y),
        }
    }

    fn from_wgs84(self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Projection::Geographic => (lon, lat),
            Projection::Utm { zone, north } => wgs84_to_utm(lon, lat, zone, north),
            Projection::WebMercator => wgs84_to_web_mercator(lon, lat),
        }
    }
}

// ── Transverse Mercator (Snyder 1987, USGS Prof. Paper 1395, pp. 61-64) ──

/// Central meridian of a UTM zone, in radians.
fn zone_central_meridian(zone: u32) -> f64 {
    ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians()
}

/// Convert WGS84 (longitude, latitude) in degrees to UTM (easting,
/// northing) in metres for the given zone and hemisphere.
fn wgs84_to_utm(lon_deg: f64, lat_deg: f64, zone: u32, north: bool) -> (f64, f64) {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let lon0 = zone_central_meridian(zone);

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let n = A / (1.0 - E2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = E_PRIME2 * cos_lat * cos_lat;
    let a_coeff = cos_lat * (lon - lon0);

    // Meridional arc length M (Snyder eq. 3-21)
    let m = meridional_arc(lat);

    let a2 = a_coeff * a_coeff;
    let a4 = a2 * a2;
    let a6 = a4 * a2;

    // Easting (Snyder eq. 8-9)
    let easting = K0 * n
        * (a_coeff
            + (1.0 - t + c) * a2 * a_coeff / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * E_PRIME2) * a4 * a_coeff / 120.0)
        + FALSE_EASTING;

    // Northing (Snyder eq. 8-10)
    let northing = K0
        * (m
            + n * tan_lat
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * E_PRIME2) * a6 / 720.0));

    let northing = if north {
        northing
    } else {
        northing + FALSE_NORTHING_SOUTH
    };

    (easting, northing)
}

/// Convert UTM (easting, northing) in metres back to WGS84 (longitude,
/// latitude) in degrees (Snyder eqs. 8-17/8-18 with the footprint
/// latitude from eq. 3-26).
fn utm_to_wgs84(easting: f64, northing: f64, zone: u32, north: bool) -> (f64, f64) {
    let x = easting - FALSE_EASTING;
    let y = if north {
        northing
    } else {
        northing - FALSE_NORTHING_SOUTH
    };
    let lon0 = zone_central_meridian(zone);

    let e4 = E2 * E2;
    let e6 = e4 * E2;

    // Footprint latitude
    let m = y / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
    let sqrt_1_e2 = (1.0 - E2).sqrt();
    let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = E_PRIME2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let n1 = A / (1.0 - E2 * sin_phi1 * sin_phi1).sqrt();
    let r1 = A * (1.0 - E2) / (1.0 - E2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d2 * d2;
    let d5 = d4 * d;
    let d6 = d4 * d2;

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * E_PRIME2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * E_PRIME2
                    - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    let lon = lon0
        + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * E_PRIME2 + 24.0 * t1 * t1)
                * d5
                / 120.0)
            / cos_phi1;

    (lon.to_degrees(), lat.to_degrees())
}

/// Meridional arc from equator to latitude `lat` (radians).
/// Snyder eq. 3-21.
fn meridional_arc(lat: f64) -> f64 {
    let e2 = E2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    A * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
        - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
}

// ── Web Mercator (spherical formulas) ────────────────────────────────────

fn wgs84_to_web_mercator(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let x = A * lon_deg.to_radians();
    let y = A * (FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln();
    (x, y)
}

fn web_mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / A).to_degrees();
    let lat = (2.0 * (y / A).exp().atan() - FRAC_PI_2).to_degrees();
    (lon, lat)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    /// Helper: assert two values are within `tol` of each other.
    fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
        let diff = (a - b).abs();
        assert!(
            diff < tol,
            "{msg}: expected {b}, got {a}, diff {diff} exceeds tolerance {tol}"
        );
    }

    #[test]
    fn parse_utm_codes() {
        assert_eq!(parse_utm_epsg(32630), Some((30, true)));
        assert_eq!(parse_utm_epsg(32721), Some((21, false)));
        assert_eq!(parse_utm_epsg(4326), None);
        assert_eq!(parse_utm_epsg(32600), None); // zone 0 invalid
        assert_eq!(parse_utm_epsg(32761), None); // zone 61 invalid
    }

    // Reference values from pyproj (PROJ 9.x):
    //   from pyproj import Transformer
    //   t = Transformer.from_crs(4326, 32630, always_xy=True)
    //   t.transform(-3.7037, 40.4168) → (440298.94, 4474257.31)
    #[test]
    fn madrid_wgs84_to_utm30n() {
        let (e, n) = wgs84_to_utm(-3.7037, 40.4168, 30, true);
        assert_close(e, 440_298.94, 1.0, "easting");
        assert_close(n, 4_474_257.31, 1.0, "northing");
    }

    #[test]
    fn madrid_utm30n_to_wgs84() {
        let (lon, lat) = utm_to_wgs84(440_298.94, 4_474_257.31, 30, true);
        assert_close(lon, -3.7037, 1e-4, "longitude");
        assert_close(lat, 40.4168, 1e-4, "latitude");
    }

    // Buenos Aires: (-58.3816, -34.6037) → UTM 21S (EPSG:32721)
    //   t = Transformer.from_crs(4326, 32721, always_xy=True)
    //   t.transform(-58.3816, -34.6037) → (373317.50, 6170036.17)
    #[test]
    fn buenos_aires_round_trip_utm21s() {
        let (e, n) = wgs84_to_utm(-58.3816, -34.6037, 21, false);
        assert_close(e, 373_317.50, 1.0, "easting");
        assert_close(n, 6_170_036.17, 1.0, "northing");

        let (lon, lat) = utm_to_wgs84(e, n, 21, false);
        assert_close(lon, -58.3816, 1e-6, "longitude");
        assert_close(lat, -34.6037, 1e-6, "latitude");
    }

    // Spherical Web Mercator: one degree of longitude is
    // 20037508.34 / 180 = 111319.49 m, and y(45°N) = R·ln(tan(67.5°)).
    #[test]
    fn web_mercator_reference_values() {
        let (x, y) = wgs84_to_web_mercator(1.0, 0.0);
        assert_close(x, 111_319.49, 0.01, "x at 1 deg lon");
        assert_close(y, 0.0, 1e-6, "y at equator");

        let (_, y) = wgs84_to_web_mercator(0.0, 45.0);
        assert_close(y, 5_621_521.49, 0.01, "y at 45 deg lat");
    }

    #[test]
    fn web_mercator_round_trip() {
        let (x, y) = wgs84_to_web_mercator(-77.0369, 38.9072);
        let (lon, lat) = web_mercator_to_wgs84(x, y);
        assert_close(lon, -77.0369, 1e-9, "longitude");
        assert_close(lat, 38.9072, 1e-9, "latitude");
    }

    #[test]
    fn nad83_to_wgs84_is_identity() {
        let t = transform(CRS::nad83(), CRS::wgs84()).unwrap();
        assert!(t.is_identity());

        let coord = Coord { x: -104.5, y: 41.2 };
        assert_eq!(t.apply_coord(coord), coord);
    }

    #[test]
    fn unsupported_crs_is_rejected() {
        let err = transform(CRS::from_epsg(27700), CRS::wgs84()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCrs(ref id) if id == "EPSG:27700"));

        let err = transform(CRS::wgs84(), CRS::from_epsg(2154)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCrs(_)));
    }

    #[test]
    fn utm_geometry_lands_in_geographic_bounds() {
        // A 10 km square near Madrid, in EPSG:32630 metres
        let square = MultiPolygon(vec![polygon![
            (x: 435_000.0, y: 4_470_000.0),
            (x: 445_000.0, y: 4_470_000.0),
            (x: 445_000.0, y: 4_480_000.0),
            (x: 435_000.0, y: 4_480_000.0),
            (x: 435_000.0, y: 4_470_000.0),
        ]]);

        let t = transform(CRS::from_epsg(32630), CRS::wgs84()).unwrap();
        let reprojected = t.apply(&square);

        for coord in reprojected.0[0].exterior().0.iter() {
            assert!((-180.0..=180.0).contains(&coord.x), "lon {}", coord.x);
            assert!((-90.0..=90.0).contains(&coord.y), "lat {}", coord.y);
            // Madrid neighbourhood specifically
            assert!((-4.5..=-3.0).contains(&coord.x), "lon {}", coord.x);
            assert!((40.0..=41.0).contains(&coord.y), "lat {}", coord.y);
        }
    }

    #[test]
    fn geographic_to_web_mercator_geometry() {
        let square = MultiPolygon(vec![polygon![
            (x: -1.0, y: -1.0),
            (x: 1.0, y: -1.0),
            (x: 1.0, y: 1.0),
            (x: -1.0, y: 1.0),
            (x: -1.0, y: -1.0),
        ]]);

        let t = transform(CRS::nad83(), CRS::web_mercator()).unwrap();
        let reprojected = t.apply(&square);

        for coord in reprojected.0[0].exterior().0.iter() {
            assert_close(coord.x.abs(), 111_319.49, 0.01, "easting magnitude");
            assert_close(coord.y.abs(), 111_325.14, 1.0, "northing magnitude");
        }
    }
}
