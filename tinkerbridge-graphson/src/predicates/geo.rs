//! Geo predicates for search-indexed geometry properties.
//!
//! `inside` matches entities within a circular area (a [`Distance`]) using
//! geodetic degree units; `inside_polygon` matches within a cartesian
//! polygon. Radius units are converted to degrees up front, so the wire
//! always carries degree radii.

use crate::error::{GraphSonError, Result};
use crate::value::GraphValue;
use geo_types::{Geometry, Point, Polygon};
use std::fmt;
use std::str::FromStr;

const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;
const EARTH_MEAN_RADIUS_KM: f64 = 6371.0087714;
const DEGREES_TO_KM: f64 = DEGREES_TO_RADIANS * EARTH_MEAN_RADIUS_KM;
const KM_TO_MILES: f64 = 0.621371192;

/// Units of length the geo predicates accept for radii.
///
/// Conversions go through kilometers using Earth's mean radius
/// (6371.0087714 km), matching the server's unit handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Miles,
    Kilometers,
    Meters,
    Degrees,
}

impl Unit {
    /// Convert a radius expressed in this unit to degrees.
    pub fn to_degrees(self, value: f64) -> f64 {
        value * self.degree_factor()
    }

    fn degree_factor(self) -> f64 {
        match self {
            Unit::Miles => 1.0 / KM_TO_MILES / DEGREES_TO_KM,
            Unit::Kilometers => 1.0 / DEGREES_TO_KM,
            Unit::Meters => 1.0 / DEGREES_TO_KM / 1000.0,
            Unit::Degrees => 1.0,
        }
    }
}

/// A circle in a two-dimensional XY plane: center point plus radius.
///
/// Used as a search criterion to determine whether another geospatial
/// object lies within the circular area. The radius is held in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    center: Point<f64>,
    radius: f64,
}

impl Distance {
    /// Create a distance from a center point and a degree radius.
    ///
    /// The radius must be a non-negative, non-NaN number and the center
    /// coordinates must be finite.
    pub fn new(center: Point<f64>, radius: f64) -> Result<Self> {
        if !center.x().is_finite() || !center.y().is_finite() {
            return Err(GraphSonError::invalid_geometry(
                "center coordinates must be finite",
            ));
        }
        if radius.is_nan() {
            return Err(GraphSonError::invalid_geometry("radius must be a number"));
        }
        if radius < 0.0 {
            return Err(GraphSonError::invalid_geometry(
                "radius must be non-negative",
            ));
        }
        Ok(Self { center, radius })
    }

    /// The center point.
    pub fn center(&self) -> Point<f64> {
        self.center
    }

    /// The radius in degrees.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DISTANCE(({} {}) {})",
            self.center.x(),
            self.center.y(),
            self.radius
        )
    }
}

impl FromStr for Distance {
    type Err = GraphSonError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GraphSonError::decode(format!("invalid DISTANCE literal: '{s}'"));
        let body = s
            .strip_prefix("DISTANCE((")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (center, radius) = body.split_once(')').ok_or_else(invalid)?;
        let mut coords = center.split_whitespace();
        let x: f64 = coords.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let y: f64 = coords.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        if coords.next().is_some() {
            return Err(invalid());
        }
        let radius: f64 = radius.trim().parse().map_err(|_| invalid())?;
        Distance::new(Point::new(x, y), radius)
    }
}

/// A geo predicate: `inside` (distance) or `insideCartesian` (polygon).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPredicate {
    pub operator: String,
    pub value: Box<GraphValue>,
    pub other: Option<Box<GraphValue>>,
}

/// Match entities within `radius` (in `unit`) of `center`.
pub fn inside(center: Point<f64>, radius: f64, unit: Unit) -> Result<GeoPredicate> {
    let distance = Distance::new(center, unit.to_degrees(radius))?;
    Ok(GeoPredicate {
        operator: "inside".to_string(),
        value: Box::new(GraphValue::Distance(distance)),
        other: None,
    })
}

/// Match entities within a cartesian polygon.
pub fn inside_polygon(polygon: Polygon<f64>) -> GeoPredicate {
    GeoPredicate {
        operator: "insideCartesian".to_string(),
        value: Box::new(GraphValue::Polygon(polygon)),
        other: None,
    }
}

/// Match entities within an arbitrary geometry.
///
/// Only polygons are supported here; circular areas need a radius and go
/// through [`inside`].
pub fn inside_geometry(geometry: Geometry<f64>) -> Result<GeoPredicate> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(inside_polygon(polygon)),
        _ => Err(GraphSonError::invalid_geometry(
            "inside only supports polygons or points with a distance",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn test_distance_to_string() {
        let d = Distance::new(Point::new(-92.0, 44.0), 2.0).unwrap();
        assert_eq!(d.to_string(), "DISTANCE((-92 44) 2)");
    }

    #[test]
    fn test_distance_parse_round_trip() {
        let d: Distance = "DISTANCE((-92 44) 2)".parse().unwrap();
        assert_eq!(d.center(), Point::new(-92.0, 44.0));
        assert_eq!(d.radius(), 2.0);
        assert_eq!(d.to_string(), "DISTANCE((-92 44) 2)");
    }

    #[test]
    fn test_distance_rejects_nan_radius() {
        assert!(Distance::new(Point::new(0.0, 0.0), f64::NAN).is_err());
    }

    #[test]
    fn test_distance_rejects_negative_radius() {
        assert!(Distance::new(Point::new(0.0, 0.0), -1.0).is_err());
    }

    #[test]
    fn test_distance_parse_rejects_garbage() {
        assert!("DISTANCE(-92 44 2)".parse::<Distance>().is_err());
        assert!("CIRCLE((-92 44) 2)".parse::<Distance>().is_err());
    }

    #[test]
    fn test_inside_converts_units_to_degrees() {
        let in_km = inside(Point::new(-92.0, 44.0), 400.0, Unit::Kilometers).unwrap();
        let in_deg = inside(
            Point::new(-92.0, 44.0),
            Unit::Kilometers.to_degrees(400.0),
            Unit::Degrees,
        )
        .unwrap();

        let radius = |p: &GeoPredicate| match p.value.as_ref() {
            GraphValue::Distance(d) => d.radius(),
            other => panic!("expected distance operand, got {other:?}"),
        };
        assert!((radius(&in_km) - radius(&in_deg)).abs() < 1e-12);
    }

    #[test]
    fn test_meter_and_kilometer_units_agree() {
        let km = Unit::Kilometers.to_degrees(1.0);
        let m = Unit::Meters.to_degrees(1000.0);
        assert!((km - m).abs() < 1e-12);
    }

    #[test]
    fn test_inside_geometry_rejects_line_string() {
        let line = Geometry::LineString(geo_types::LineString::from(vec![
            (0.0, 0.0),
            (1.0, 1.0),
        ]));
        assert!(inside_geometry(line).is_err());
    }

    #[test]
    fn test_inside_geometry_accepts_polygon() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        let p = inside_geometry(Geometry::Polygon(poly)).unwrap();
        assert_eq!(p.operator, "insideCartesian");
    }
}
