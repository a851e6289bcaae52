//! Well-known-text forms for geometry values.
//!
//! The wire format carries geometries as WKT strings with a fixed layout
//! (space after the geometry keyword, comma-space between coordinate pairs),
//! so rendering is done here rather than through a generic WKT printer.
//! Parsing delegates to the `wkt` crate.

use crate::error::{GraphSonError, Result};
use geo_types::{Geometry, LineString, Point, Polygon};
use std::str::FromStr;

/// Render a point as `POINT (x y)`.
pub fn point_wkt(point: &Point<f64>) -> String {
    format!("POINT ({} {})", point.x(), point.y())
}

/// Render a line string as `LINESTRING (x1 y1, x2 y2, ...)`.
pub fn line_string_wkt(line: &LineString<f64>) -> String {
    format!("LINESTRING ({})", coord_seq(line))
}

/// Render a polygon as `POLYGON ((x1 y1, ...), (hole), ...)`.
pub fn polygon_wkt(polygon: &Polygon<f64>) -> String {
    let mut rings = vec![format!("({})", coord_seq(polygon.exterior()))];
    for interior in polygon.interiors() {
        rings.push(format!("({})", coord_seq(interior)));
    }
    format!("POLYGON ({})", rings.join(", "))
}

fn coord_seq(line: &LineString<f64>) -> String {
    line.coords()
        .map(|c| format!("{} {}", c.x, c.y))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a WKT string into a geo-types geometry.
pub fn parse_wkt(text: &str) -> Result<Geometry<f64>> {
    wkt::Wkt::<f64>::from_str(text)
        .map_err(|e| GraphSonError::decode(format!("WKT parse error: {e:?}")))
        .and_then(|w| {
            w.try_into().map_err(|e: wkt::conversion::Error| {
                GraphSonError::decode(format!("WKT conversion error: {e:?}"))
            })
        })
}

/// Parse a WKT string that must be a point.
pub fn parse_point(text: &str) -> Result<Point<f64>> {
    match parse_wkt(text)? {
        Geometry::Point(p) => Ok(p),
        other => Err(GraphSonError::decode(format!(
            "expected POINT, got {}",
            geometry_name(&other)
        ))),
    }
}

/// Parse a WKT string that must be a line string.
pub fn parse_line_string(text: &str) -> Result<LineString<f64>> {
    match parse_wkt(text)? {
        Geometry::LineString(l) => Ok(l),
        other => Err(GraphSonError::decode(format!(
            "expected LINESTRING, got {}",
            geometry_name(&other)
        ))),
    }
}

/// Parse a WKT string that must be a polygon.
pub fn parse_polygon(text: &str) -> Result<Polygon<f64>> {
    match parse_wkt(text)? {
        Geometry::Polygon(p) => Ok(p),
        other => Err(GraphSonError::decode(format!(
            "expected POLYGON, got {}",
            geometry_name(&other)
        ))),
    }
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::Line(_) | Geometry::LineString(_) => "LINESTRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        Geometry::Rect(_) => "RECT",
        Geometry::Triangle(_) => "TRIANGLE",
    }
}
