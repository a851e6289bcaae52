//! Codec table entries for the extension wire tags.
//!
//! Most scalar codecs follow the string-round-trip shape: encode through the
//! value's canonical text form, decode through the matching parse, coercing
//! non-string payloads to text first. Timestamps (ISO-8601) and blobs
//! (base64) override both directions because their domain types have no
//! usable canonical `Display`/`FromStr` pair.

use crate::error::{GraphSonError, Result};
use crate::geometry;
use crate::predicates::geo::Distance;
use crate::reader::GraphSonReader;
use crate::structure::Edge;
use crate::value::GraphValue;
use crate::writer::GraphSonWriter;
use crate::{tags, GRAPHSON_TYPE_KEY, GRAPHSON_VALUE_KEY};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use num_bigint::BigInt;
use serde_json::{json, Map, Value as JsonValue};
use std::net::IpAddr;
use uuid::Uuid;

/// A bidirectional mapping between one domain type and one wire tag.
///
/// Codecs are stateless: constructed once when the registry is built and
/// never mutated afterwards.
pub trait GraphCodec: Send + Sync {
    /// The wire tag this codec is registered under.
    fn tag(&self) -> &str;

    /// Whether this codec applies to the given domain value.
    fn can_encode(&self, value: &GraphValue) -> bool;

    /// Encode a domain value into its tagged wire form. Nested operands are
    /// adapted through the writer.
    fn encode(&self, value: &GraphValue, writer: &GraphSonWriter) -> Result<JsonValue>;

    /// Decode the `@value` payload of a tagged wire value.
    fn decode(&self, payload: &JsonValue, reader: &GraphSonReader) -> Result<GraphValue>;
}

/// Build a `{"@type": tag, "@value": value}` wire object.
pub(crate) fn tagged(tag: &str, value: JsonValue) -> JsonValue {
    let mut map = Map::new();
    map.insert(
        GRAPHSON_TYPE_KEY.to_string(),
        JsonValue::String(tag.to_string()),
    );
    map.insert(GRAPHSON_VALUE_KEY.to_string(), value);
    JsonValue::Object(map)
}

/// Take a payload as text, coercing scalar JSON payloads to their text form.
fn payload_text(payload: &JsonValue) -> Result<String> {
    match payload {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(GraphSonError::decode(format!(
            "expected text payload, got {other}"
        ))),
    }
}

/// A string-round-trip codec entry.
pub struct StringScalarCodec {
    tag: &'static str,
    matches: fn(&GraphValue) -> bool,
    to_text: fn(&GraphValue) -> Option<String>,
    from_text: fn(&str) -> Result<GraphValue>,
}

impl GraphCodec for StringScalarCodec {
    fn tag(&self) -> &str {
        self.tag
    }

    fn can_encode(&self, value: &GraphValue) -> bool {
        (self.matches)(value)
    }

    fn encode(&self, value: &GraphValue, _writer: &GraphSonWriter) -> Result<JsonValue> {
        let text = (self.to_text)(value).ok_or_else(|| {
            GraphSonError::encode(format!("value is not encodable as {}", self.tag))
        })?;
        Ok(tagged(self.tag, JsonValue::String(text)))
    }

    fn decode(&self, payload: &JsonValue, _reader: &GraphSonReader) -> Result<GraphValue> {
        (self.from_text)(&payload_text(payload)?)
    }
}

/// The scalar codec set: one entry per domain scalar, keyed by its wire tag.
pub(crate) fn scalar_codecs() -> Vec<Box<dyn GraphCodec>> {
    let entries: Vec<StringScalarCodec> = vec![
        StringScalarCodec {
            tag: tags::UUID,
            matches: |v| matches!(v, GraphValue::Uuid(_)),
            to_text: |v| match v {
                GraphValue::Uuid(u) => Some(u.to_string()),
                _ => None,
            },
            from_text: |s| {
                Uuid::parse_str(s)
                    .map(GraphValue::Uuid)
                    .map_err(|e| GraphSonError::decode(format!("invalid UUID: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::INT64,
            matches: |v| matches!(v, GraphValue::Int64(_)),
            to_text: |v| match v {
                GraphValue::Int64(i) => Some(i.to_string()),
                _ => None,
            },
            from_text: |s| {
                s.parse::<i64>()
                    .map(GraphValue::Int64)
                    .map_err(|e| GraphSonError::decode(format!("invalid Int64: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::BIG_DECIMAL,
            matches: |v| matches!(v, GraphValue::BigDecimal(_)),
            to_text: |v| match v {
                GraphValue::BigDecimal(d) => Some(d.to_string()),
                _ => None,
            },
            from_text: |s| {
                s.parse::<BigDecimal>()
                    .map(GraphValue::BigDecimal)
                    .map_err(|e| GraphSonError::decode(format!("invalid BigDecimal: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::BIG_INTEGER,
            matches: |v| matches!(v, GraphValue::BigInt(_)),
            to_text: |v| match v {
                GraphValue::BigInt(i) => Some(i.to_string()),
                _ => None,
            },
            from_text: |s| {
                s.parse::<BigInt>()
                    .map(GraphValue::BigInt)
                    .map_err(|e| GraphSonError::decode(format!("invalid BigInteger: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::INET_ADDRESS,
            matches: |v| matches!(v, GraphValue::Inet(_)),
            to_text: |v| match v {
                GraphValue::Inet(addr) => Some(addr.to_string()),
                _ => None,
            },
            from_text: |s| {
                s.parse::<IpAddr>()
                    .map(GraphValue::Inet)
                    .map_err(|e| GraphSonError::decode(format!("invalid inet address: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::LOCAL_DATE,
            matches: |v| matches!(v, GraphValue::LocalDate(_)),
            to_text: |v| match v {
                GraphValue::LocalDate(d) => Some(d.to_string()),
                _ => None,
            },
            from_text: |s| {
                s.parse::<NaiveDate>()
                    .map(GraphValue::LocalDate)
                    .map_err(|e| GraphSonError::decode(format!("invalid local date: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::LOCAL_TIME,
            matches: |v| matches!(v, GraphValue::LocalTime(_)),
            to_text: |v| match v {
                GraphValue::LocalTime(t) => Some(t.to_string()),
                _ => None,
            },
            from_text: |s| {
                s.parse::<NaiveTime>()
                    .map(GraphValue::LocalTime)
                    .map_err(|e| GraphSonError::decode(format!("invalid local time: {e}")))
            },
        },
        // ISO-8601 with millisecond precision; chrono's DateTime has no
        // canonical Display/FromStr pair matching the wire form.
        StringScalarCodec {
            tag: tags::INSTANT,
            matches: |v| matches!(v, GraphValue::Instant(_)),
            to_text: |v| match v {
                GraphValue::Instant(d) => Some(d.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
                _ => None,
            },
            from_text: |s| {
                DateTime::parse_from_rfc3339(s)
                    .map(|d| GraphValue::Instant(d.with_timezone(&Utc)))
                    .map_err(|e| GraphSonError::decode(format!("invalid instant: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::BLOB,
            matches: |v| matches!(v, GraphValue::Blob(_)),
            to_text: |v| match v {
                GraphValue::Blob(bytes) => Some(STANDARD.encode(bytes)),
                _ => None,
            },
            from_text: |s| {
                STANDARD
                    .decode(s)
                    .map(GraphValue::Blob)
                    .map_err(|e| GraphSonError::decode(format!("invalid base64 blob: {e}")))
            },
        },
        StringScalarCodec {
            tag: tags::POINT,
            matches: |v| matches!(v, GraphValue::Point(_)),
            to_text: |v| match v {
                GraphValue::Point(p) => Some(geometry::point_wkt(p)),
                _ => None,
            },
            from_text: |s| geometry::parse_point(s).map(GraphValue::Point),
        },
        StringScalarCodec {
            tag: tags::LINE_STRING,
            matches: |v| matches!(v, GraphValue::LineString(_)),
            to_text: |v| match v {
                GraphValue::LineString(l) => Some(geometry::line_string_wkt(l)),
                _ => None,
            },
            from_text: |s| geometry::parse_line_string(s).map(GraphValue::LineString),
        },
        StringScalarCodec {
            tag: tags::POLYGON,
            matches: |v| matches!(v, GraphValue::Polygon(_)),
            to_text: |v| match v {
                GraphValue::Polygon(p) => Some(geometry::polygon_wkt(p)),
                _ => None,
            },
            from_text: |s| geometry::parse_polygon(s).map(GraphValue::Polygon),
        },
        StringScalarCodec {
            tag: tags::DISTANCE,
            matches: |v| matches!(v, GraphValue::Distance(_)),
            to_text: |v| match v {
                GraphValue::Distance(d) => Some(d.to_string()),
                _ => None,
            },
            from_text: |s| s.parse::<Distance>().map(GraphValue::Distance),
        },
    ];

    entries
        .into_iter()
        .map(|c| Box::new(c) as Box<dyn GraphCodec>)
        .collect()
}

/// Codec for the predicate families.
///
/// Text-distance predicates are emitted under the base `g:P` tag with a
/// `{query, distance}` payload — the wire format has a native representation
/// for that narrow case, and servers that do not recognize the extension tag
/// still accept it. Everything else goes out under the extension tag with a
/// `predicateType` discriminator.
pub struct DsePredicateCodec;

impl DsePredicateCodec {
    fn encode_extension(
        &self,
        operator: &str,
        predicate_type: &str,
        value: &GraphValue,
        other: Option<&GraphValue>,
        writer: &GraphSonWriter,
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        body.insert("predicate".to_string(), json!(operator));
        body.insert("predicateType".to_string(), json!(predicate_type));
        let adapted = match other {
            None => writer.adapt(value)?,
            Some(other) => JsonValue::Array(vec![writer.adapt(value)?, writer.adapt(other)?]),
        };
        body.insert("value".to_string(), adapted);
        Ok(tagged(tags::DSE_P, JsonValue::Object(body)))
    }
}

impl GraphCodec for DsePredicateCodec {
    fn tag(&self) -> &str {
        tags::DSE_P
    }

    fn can_encode(&self, value: &GraphValue) -> bool {
        matches!(
            value,
            GraphValue::Predicate(_) | GraphValue::GeoPredicate(_) | GraphValue::TextPredicate(_)
        )
    }

    fn encode(&self, value: &GraphValue, writer: &GraphSonWriter) -> Result<JsonValue> {
        match value {
            GraphValue::TextPredicate(p) => {
                let mut body = Map::new();
                body.insert("predicate".to_string(), json!(p.operator));
                body.insert(
                    "value".to_string(),
                    json!({ "query": p.query, "distance": p.distance }),
                );
                Ok(tagged(tags::P, JsonValue::Object(body)))
            }
            GraphValue::Predicate(p) => {
                self.encode_extension(&p.operator, "P", &p.value, p.other.as_deref(), writer)
            }
            GraphValue::GeoPredicate(p) => {
                self.encode_extension(&p.operator, "Geo", &p.value, p.other.as_deref(), writer)
            }
            other => Err(GraphSonError::encode(format!(
                "predicate codec cannot encode {other:?}"
            ))),
        }
    }

    fn decode(&self, _payload: &JsonValue, _reader: &GraphSonReader) -> Result<GraphValue> {
        // Predicates travel only in requests; servers never send them back.
        Err(GraphSonError::decode("predicate values are request-only"))
    }
}

/// Codec for a traversal batch, registered under a namespaced tag that
/// collides with neither the base library's nor the server's list tags.
pub struct BatchCodec;

impl GraphCodec for BatchCodec {
    fn tag(&self) -> &str {
        tags::BATCH
    }

    fn can_encode(&self, value: &GraphValue) -> bool {
        matches!(value, GraphValue::Batch(_))
    }

    fn encode(&self, value: &GraphValue, writer: &GraphSonWriter) -> Result<JsonValue> {
        let GraphValue::Batch(batch) = value else {
            return Err(GraphSonError::encode(format!(
                "batch codec cannot encode {value:?}"
            )));
        };
        let items = batch
            .items()
            .iter()
            .map(|bytecode| writer.encode_bytecode(bytecode))
            .collect::<Result<Vec<_>>>()?;
        Ok(writer.list_form(items))
    }

    fn decode(&self, _payload: &JsonValue, _reader: &GraphSonReader) -> Result<GraphValue> {
        Err(GraphSonError::decode("traversal batches are request-only"))
    }
}

/// Legacy host-driver edge mapping, kept for parity with the driver's codec
/// table. It decodes only the edge id and label, dropping adjacency; the
/// registry removes this entry so edges decode through the standard
/// structure handling instead.
pub struct DriverEdgeCodec;

impl GraphCodec for DriverEdgeCodec {
    fn tag(&self) -> &str {
        tags::EDGE
    }

    fn can_encode(&self, value: &GraphValue) -> bool {
        matches!(value, GraphValue::Edge(_))
    }

    fn encode(&self, value: &GraphValue, _writer: &GraphSonWriter) -> Result<JsonValue> {
        Err(GraphSonError::encode(format!(
            "edges are not encodable: {value:?}"
        )))
    }

    fn decode(&self, payload: &JsonValue, reader: &GraphSonReader) -> Result<GraphValue> {
        let map = payload
            .as_object()
            .ok_or_else(|| GraphSonError::decode("edge payload must be an object"))?;
        let id = match map.get("id") {
            Some(id) => reader.read(id)?,
            None => GraphValue::Null,
        };
        let label = map
            .get("label")
            .and_then(|l| l.as_str())
            .unwrap_or("edge")
            .to_string();
        Ok(GraphValue::Edge(Edge {
            id: Box::new(id),
            label,
            in_v: Box::new(GraphValue::Null),
            in_v_label: String::new(),
            out_v: Box::new(GraphValue::Null),
            out_v_label: String::new(),
            properties: Vec::new(),
        }))
    }
}
