//! Domain value model for GraphSON serialization.
//!
//! Every value that can cross the wire is a variant of [`GraphValue`]. The
//! variant is the dispatch key: the writer maps a variant to its wire tag and
//! looks the codec up in the registry, so no runtime type probing is needed
//! in either direction.

use crate::bytecode::{Bytecode, TraversalBatch};
use crate::predicates::geo::{Distance, GeoPredicate};
use crate::predicates::search::TextPredicate;
use crate::predicates::Predicate;
use crate::structure::{Edge, Path, Property, Traverser, Vertex, VertexProperty};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use geo_types::{LineString, Point, Polygon};
use num_bigint::BigInt;
use serde_json::Value as JsonValue;
use std::net::IpAddr;
use uuid::Uuid;

/// A graph domain value.
///
/// Scalars map one-to-one onto the wire tag table; containers (`List`, `Map`)
/// are encoded according to the protocol version (plain JSON in GraphSON2,
/// tagged in GraphSON3). `Tagged` preserves wire values whose tag is not
/// registered, so unknown server-side types survive a round trip untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Uuid(Uuid),
    BigDecimal(BigDecimal),
    BigInt(BigInt),
    Inet(IpAddr),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    Instant(DateTime<Utc>),
    Blob(Vec<u8>),
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
    Distance(Distance),
    /// Comparison-family predicate (equality, ordering, membership, plain
    /// search operators).
    Predicate(Predicate),
    /// Geo predicate (`inside`, `insideCartesian`).
    GeoPredicate(GeoPredicate),
    /// Search predicate carrying a query string and an edit/term distance.
    TextPredicate(TextPredicate),
    /// Traversal enum value such as `Order` or `Scope`.
    Enum(EnumValue),
    Bytecode(Bytecode),
    Batch(TraversalBatch),
    List(Vec<GraphValue>),
    Map(Vec<(GraphValue, GraphValue)>),
    Vertex(Vertex),
    Edge(Edge),
    VertexProperty(VertexProperty),
    Property(Property),
    Path(Path),
    Traverser(Box<Traverser>),
    /// A wire value whose tag is not registered; kept verbatim.
    Tagged(TaggedValue),
}

impl GraphValue {
    /// Convenience accessor for string values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GraphValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convenience accessor for integral values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GraphValue::Int32(v) => Some(i64::from(*v)),
            GraphValue::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

/// A traversal enum value, e.g. `Order.decr` or `Scope.local`.
///
/// Encoded as `{"@type": "g:<EnumType>", "@value": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub enum_type: String,
    pub value: String,
}

impl EnumValue {
    /// Create an enum value from its type name and member name.
    pub fn new(enum_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enum_type: enum_type.into(),
            value: value.into(),
        }
    }

    /// An `Order` enum member (`incr`, `decr`, `shuffle`).
    pub fn order(value: impl Into<String>) -> Self {
        Self::new("Order", value)
    }
}

/// A wire value with an unregistered tag, preserved verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedValue {
    pub tag: String,
    pub value: JsonValue,
}

impl TaggedValue {
    /// Create a tagged value.
    pub fn new(tag: impl Into<String>, value: JsonValue) -> Self {
        Self {
            tag: tag.into(),
            value,
        }
    }
}

impl From<bool> for GraphValue {
    fn from(v: bool) -> Self {
        GraphValue::Bool(v)
    }
}

impl From<i32> for GraphValue {
    fn from(v: i32) -> Self {
        GraphValue::Int32(v)
    }
}

impl From<i64> for GraphValue {
    fn from(v: i64) -> Self {
        GraphValue::Int64(v)
    }
}

impl From<f64> for GraphValue {
    fn from(v: f64) -> Self {
        GraphValue::Double(v)
    }
}

impl From<&str> for GraphValue {
    fn from(v: &str) -> Self {
        GraphValue::String(v.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(v: String) -> Self {
        GraphValue::String(v)
    }
}

impl From<Uuid> for GraphValue {
    fn from(v: Uuid) -> Self {
        GraphValue::Uuid(v)
    }
}

impl From<Vec<u8>> for GraphValue {
    fn from(v: Vec<u8>) -> Self {
        GraphValue::Blob(v)
    }
}

impl From<Point<f64>> for GraphValue {
    fn from(v: Point<f64>) -> Self {
        GraphValue::Point(v)
    }
}

impl From<Distance> for GraphValue {
    fn from(v: Distance) -> Self {
        GraphValue::Distance(v)
    }
}

impl From<Predicate> for GraphValue {
    fn from(v: Predicate) -> Self {
        GraphValue::Predicate(v)
    }
}

impl From<GeoPredicate> for GraphValue {
    fn from(v: GeoPredicate) -> Self {
        GraphValue::GeoPredicate(v)
    }
}

impl From<TextPredicate> for GraphValue {
    fn from(v: TextPredicate) -> Self {
        GraphValue::TextPredicate(v)
    }
}

impl From<EnumValue> for GraphValue {
    fn from(v: EnumValue) -> Self {
        GraphValue::Enum(v)
    }
}
