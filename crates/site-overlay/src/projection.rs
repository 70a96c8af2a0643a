// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Geographic to planar coordinate conversion.
//!
//! Markers are placed in EPSG:3857 (spherical Web Mercator) metres, the
//! planar system slippy map tile pyramids are cut in. The [`Projector`]
//! trait is the seam where a different map engine projection can be
//! plugged in; [`WebMercator`] is the one used by the viewer.

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Sphere radius used by EPSG:3857, in metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the square EPSG:3857 world, in metres.
pub const HALF_SIZE: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Tile edge length the resolution math assumes, in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// A point in the map's planar projection units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Converts geographic degrees into planar map coordinates.
///
/// Implementations must be stateless: the same `(longitude, latitude)`
/// always yields the same point, and one projector may be shared across
/// any number of calls or threads.
pub trait Projector: Send + Sync {
    /// EPSG-style identifier of the planar system, e.g. `"EPSG:3857"`.
    fn code(&self) -> &'static str;

    /// Project geographic degrees to planar coordinates.
    fn project(&self, longitude: f64, latitude: f64) -> Result<ProjectedPoint, OverlayError>;

    /// Inverse of [`Projector::project`], returning `(longitude, latitude)`.
    fn unproject(&self, point: ProjectedPoint) -> (f64, f64);
}

/// Reject non-finite or out-of-range geographic coordinates.
pub fn validate(longitude: f64, latitude: f64) -> Result<(), OverlayError> {
    let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
    let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
    if lon_ok && lat_ok {
        Ok(())
    } else {
        Err(OverlayError::InvalidCoordinate { longitude, latitude })
    }
}

/// Spherical Web Mercator (EPSG:3857).
///
/// Input outside `[-180, 180]` longitude or `[-90, 90]` latitude is
/// rejected with [`OverlayError::InvalidCoordinate`]. Inside that range,
/// latitudes poleward of roughly ±85.0511° fall off the square world and
/// their `y` is clamped to `±HALF_SIZE`; this is the only clamping done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebMercator;

impl Projector for WebMercator {
    fn code(&self) -> &'static str {
        "EPSG:3857"
    }

    fn project(&self, longitude: f64, latitude: f64) -> Result<ProjectedPoint, OverlayError> {
        validate(longitude, latitude)?;

        let x = EARTH_RADIUS * longitude.to_radians();
        let y = EARTH_RADIUS * (std::f64::consts::PI * (latitude + 90.0) / 360.0).tan().ln();

        Ok(ProjectedPoint::new(x, y.clamp(-HALF_SIZE, HALF_SIZE)))
    }

    fn unproject(&self, point: ProjectedPoint) -> (f64, f64) {
        let longitude = 180.0 * point.x / HALF_SIZE;
        let latitude = 360.0 * (point.y / EARTH_RADIUS).exp().atan() / std::f64::consts::PI - 90.0;
        (longitude, latitude)
    }
}

/// Ground metres covered by one screen pixel at `latitude` and `zoom`.
#[must_use]
pub fn resolution_at(latitude: f64, zoom: f64) -> f64 {
    2.0 * HALF_SIZE * latitude.to_radians().cos() / (TILE_SIZE * 2_f64.powf(zoom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_origin() {
        let p = WebMercator.project(0.0, 0.0).unwrap();
        assert!(p.x.abs() < 1e-9);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_antimeridian_is_half_size() {
        let p = WebMercator.project(180.0, 0.0).unwrap();
        assert!((p.x - HALF_SIZE).abs() < 1e-6);
        let p = WebMercator.project(-180.0, 0.0).unwrap();
        assert!((p.x + HALF_SIZE).abs() < 1e-6);
    }

    #[test]
    fn test_project_is_deterministic() {
        let a = WebMercator.project(-95.017_321_709_262_1, 29.155_161_224_973_3).unwrap();
        let b = WebMercator.project(-95.017_321_709_262_1, 29.155_161_224_973_3).unwrap();
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn test_houston_site_lands_in_expected_quadrant() {
        let p = WebMercator.project(-95.017_321_709_262_1, 29.155_161_224_973_3).unwrap();
        // West of Greenwich and north of the equator.
        assert!(p.x < 0.0);
        assert!(p.y > 0.0);
        assert!((p.x - -10_577_279.869).abs() < 0.01);
        assert!((p.y - 3_395_409.443).abs() < 0.01);
    }

    #[test]
    fn test_round_trip_through_unproject() {
        let p = WebMercator.project(-95.4344, 29.733_032).unwrap();
        let (lon, lat) = WebMercator.unproject(p);
        assert!((lon - -95.4344).abs() < 1e-9);
        assert!((lat - 29.733_032).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let err = WebMercator.project(10.0, 200.0).unwrap_err();
        assert!(err.is_invalid_coordinate());
    }

    #[test]
    fn test_out_of_range_longitude_rejected() {
        assert!(WebMercator.project(-180.5, 0.0).is_err());
        assert!(WebMercator.project(f64::NAN, 0.0).is_err());
        assert!(WebMercator.project(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_poles_clamp_to_world_edge() {
        let north = WebMercator.project(0.0, 90.0).unwrap();
        let south = WebMercator.project(0.0, -90.0).unwrap();
        assert!((north.y - HALF_SIZE).abs() < 1e-6);
        assert!((south.y + HALF_SIZE).abs() < 1e-6);
    }

    #[test]
    fn test_resolution_at_equator() {
        let res = resolution_at(0.0, 0.0);
        assert!((res - 156_543.033_928).abs() < 1e-3);
        // Each zoom step halves the resolution.
        assert!((resolution_at(0.0, 1.0) * 2.0 - res).abs() < 1e-6);
    }

    #[test]
    fn test_code() {
        assert_eq!(WebMercator.code(), "EPSG:3857");
    }
}
