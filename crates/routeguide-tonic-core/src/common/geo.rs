//! Pure geo math over the wire types.
//!
//! Coordinates travel as fixed-point integers in the E7 representation
//! (degrees multiplied by 10,000,000), so point equality is exact integer
//! equality and never involves a tolerance. Distances use the haversine
//! formula on a spherical Earth.
//!
//! Everything in this module is side-effect free and shared by the handlers
//! and their tests.

use crate::proto::{Point, Rectangle};
use crate::{Error, Result};

/// Scale factor between E7 fixed-point coordinates and degrees.
pub const COORD_FACTOR: f64 = 10_000_000.0;

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns true iff both coordinate fields match exactly.
///
/// Exact integer comparison: two points one E7 unit apart are distinct.
pub fn points_equal(a: &Point, b: &Point) -> bool {
    a.latitude == b.latitude && a.longitude == b.longitude
}

/// Great-circle distance in meters between two points, via the haversine
/// formula.
///
/// Symmetric in its arguments, and zero for identical points. The result is
/// left as `f64`; callers that need the wire's integer meters truncate it
/// themselves.
pub fn distance_meters(a: &Point, b: &Point) -> f64 {
    let lat_a = f64::from(a.latitude) / COORD_FACTOR;
    let lat_b = f64::from(b.latitude) / COORD_FACTOR;
    let lon_a = f64::from(a.longitude) / COORD_FACTOR;
    let lon_b = f64::from(b.longitude) / COORD_FACTOR;

    let lat_rad_a = lat_a.to_radians();
    let lat_rad_b = lat_b.to_radians();
    let delta_lat = (lat_b - lat_a).to_radians();
    let delta_lon = (lon_b - lon_a).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_rad_a.cos() * lat_rad_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Normalized, inclusive bounding box derived from a [`Rectangle`].
///
/// The wire rectangle's `lo`/`hi` corners are order-independent: the box is
/// the min/max span of the two corners on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectBounds {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl RectBounds {
    /// Builds the normalized bounds from two corner points, in either order.
    pub fn new(lo: &Point, hi: &Point) -> Self {
        Self {
            left: lo.longitude.min(hi.longitude),
            right: lo.longitude.max(hi.longitude),
            top: lo.latitude.max(hi.latitude),
            bottom: lo.latitude.min(hi.latitude),
        }
    }

    /// Returns true iff the point lies inside the box, all four bounds
    /// inclusive.
    pub fn contains(&self, point: &Point) -> bool {
        point.longitude >= self.left
            && point.longitude <= self.right
            && point.latitude >= self.bottom
            && point.latitude <= self.top
    }
}

impl TryFrom<&Rectangle> for RectBounds {
    type Error = Error;

    /// Fails when the wire rectangle is missing a corner, which proto3
    /// permits but the service treats as a malformed request.
    fn try_from(rect: &Rectangle) -> Result<Self> {
        let lo = rect.lo.as_ref().ok_or_else(|| Error::InvalidRequest {
            reason: "rectangle is missing the lo corner".to_string(),
        })?;
        let hi = rect.hi.as_ref().ok_or_else(|| Error::InvalidRequest {
            reason: "rectangle is missing the hi corner".to_string(),
        })?;
        Ok(Self::new(lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: i32, longitude: i32) -> Point {
        Point {
            latitude,
            longitude,
        }
    }

    #[test]
    fn equality_is_exact() {
        let a = point(37_770_000, -122_480_000);
        assert!(points_equal(&a, &a));
        assert!(!points_equal(&a, &point(37_770_000, -122_480_001)));
        assert!(!points_equal(&a, &point(37_770_001, -122_480_000)));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let points = [
            point(0, 0),
            point(37_770_000, -122_480_000),
            point(-900_000_000, 1_800_000_000),
        ];
        for p in &points {
            assert_eq!(distance_meters(p, p), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point(407_838_351, -746_143_763);
        let b = point(408_122_808, -743_999_179);
        assert_eq!(distance_meters(&a, &b), distance_meters(&b, &a));
    }

    #[test]
    fn one_degree_of_latitude() {
        // Along a meridian the haversine collapses to R * delta_lat, so one
        // degree is pi * R / 180 meters.
        let a = point(0, 0);
        let b = point(10_000_000, 0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_METERS / 180.0;
        assert!((distance_meters(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn bounds_are_corner_order_independent() {
        let lo = point(400_000_000, -750_000_000);
        let hi = point(420_000_000, -730_000_000);
        assert_eq!(RectBounds::new(&lo, &hi), RectBounds::new(&hi, &lo));
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = RectBounds::new(
            &point(400_000_000, -750_000_000),
            &point(420_000_000, -730_000_000),
        );

        // Corners and edges count as inside.
        assert!(bounds.contains(&point(400_000_000, -750_000_000)));
        assert!(bounds.contains(&point(420_000_000, -730_000_000)));
        assert!(bounds.contains(&point(400_000_000, -740_000_000)));
        assert!(bounds.contains(&point(410_000_000, -740_000_000)));

        // One E7 unit outside on each axis is out.
        assert!(!bounds.contains(&point(399_999_999, -740_000_000)));
        assert!(!bounds.contains(&point(420_000_001, -740_000_000)));
        assert!(!bounds.contains(&point(410_000_000, -750_000_001)));
        assert!(!bounds.contains(&point(410_000_000, -729_999_999)));
    }

    #[test]
    fn bounds_from_partial_rectangle_fail() {
        let rect = Rectangle {
            lo: Some(point(0, 0)),
            hi: None,
        };
        assert!(matches!(
            RectBounds::try_from(&rect),
            Err(Error::InvalidRequest { .. })
        ));
    }
}
