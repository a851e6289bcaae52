//! GraphSON reader: wire JSON to domain values.
//!
//! Tagged values resolve through the registry first, then through the core
//! structure and primitive handling. A tag known to neither is preserved as
//! an opaque tagged value rather than rejected, so newer server-side types
//! pass through this layer untouched.

use crate::error::{GraphSonError, Result};
use crate::protocol::GraphSonVersion;
use crate::registry::Registry;
use crate::structure::{Edge, Path, Property, Traverser, Vertex, VertexProperty};
use crate::tags;
use crate::value::{GraphValue, TaggedValue};
use crate::{GRAPHSON_TYPE_KEY, GRAPHSON_VALUE_KEY};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

/// A protocol-versioned GraphSON reader over a shared registry.
pub struct GraphSonReader {
    version: GraphSonVersion,
    registry: Arc<Registry>,
}

impl GraphSonReader {
    /// Create a reader for the given protocol version.
    pub fn new(version: GraphSonVersion, registry: Arc<Registry>) -> Self {
        Self { version, registry }
    }

    /// The protocol version this reader accepts.
    pub fn version(&self) -> GraphSonVersion {
        self.version
    }

    /// Decode a wire JSON value into a domain value.
    pub fn read(&self, value: &JsonValue) -> Result<GraphValue> {
        match value {
            JsonValue::Null => Ok(GraphValue::Null),
            JsonValue::Bool(b) => Ok(GraphValue::Bool(*b)),
            JsonValue::Number(n) => read_number(n),
            JsonValue::String(s) => Ok(GraphValue::String(s.clone())),
            JsonValue::Array(items) => Ok(GraphValue::List(
                items.iter().map(|i| self.read(i)).collect::<Result<_>>()?,
            )),
            JsonValue::Object(map) => self.read_object(map),
        }
    }

    /// Parse one result row's embedded payload into a traverser.
    ///
    /// The payload is a JSON object with a `result` field and an optional
    /// `bulk` repetition count (default 1).
    pub fn parse_row(&self, gremlin: &str) -> Result<Traverser> {
        let parsed: JsonValue = serde_json::from_str(gremlin)
            .map_err(|e| GraphSonError::decode(format!("invalid row payload: {e}")))?;
        let map = parsed
            .as_object()
            .ok_or_else(|| GraphSonError::decode("row payload must be a JSON object"))?;
        let result = map
            .get("result")
            .ok_or_else(|| GraphSonError::decode("row payload is missing 'result'"))?;
        let object = self.read(result)?;
        let bulk = match map.get("bulk") {
            None => 1,
            Some(bulk) => match self.read(bulk)?.as_i64() {
                Some(n) if n > 0 => n as u64,
                _ => 1,
            },
        };
        Ok(Traverser::new(object, bulk))
    }

    fn read_object(&self, map: &Map<String, JsonValue>) -> Result<GraphValue> {
        let tag = map.get(GRAPHSON_TYPE_KEY).and_then(|t| t.as_str());
        let (Some(tag), Some(payload)) = (tag, map.get(GRAPHSON_VALUE_KEY)) else {
            // Untagged object: a plain string-keyed map.
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                entries.push((GraphValue::String(key.clone()), self.read(value)?));
            }
            return Ok(GraphValue::Map(entries));
        };
        if let Some(codec) = self.registry.codec(tag) {
            return codec.decode(payload, self);
        }
        self.read_core(tag, payload)
    }

    fn read_core(&self, tag: &str, payload: &JsonValue) -> Result<GraphValue> {
        match tag {
            tags::INT32 => self
                .read(payload)?
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(GraphValue::Int32)
                .ok_or_else(|| GraphSonError::decode("invalid Int32 payload")),
            tags::DOUBLE | tags::FLOAT => payload
                .as_f64()
                .map(GraphValue::Double)
                .ok_or_else(|| GraphSonError::decode("invalid floating point payload")),
            tags::LIST | tags::SET => {
                let items = payload
                    .as_array()
                    .ok_or_else(|| GraphSonError::decode("list payload must be an array"))?;
                Ok(GraphValue::List(
                    items.iter().map(|i| self.read(i)).collect::<Result<_>>()?,
                ))
            }
            tags::MAP => self.read_map(payload),
            tags::VERTEX => self.read_vertex(payload),
            tags::EDGE => self.read_edge(payload),
            tags::VERTEX_PROPERTY => self.read_vertex_property(payload),
            tags::PROPERTY => self.read_property(payload),
            tags::PATH => self.read_path(payload),
            tags::TRAVERSER => self.read_traverser(payload),
            // Unregistered tag: preserved verbatim for forward
            // compatibility.
            _ => Ok(GraphValue::Tagged(TaggedValue::new(tag, payload.clone()))),
        }
    }

    fn read_map(&self, payload: &JsonValue) -> Result<GraphValue> {
        // GraphSON3 maps are flattened [k1, v1, k2, v2, ...] arrays.
        let flat = payload
            .as_array()
            .ok_or_else(|| GraphSonError::decode("map payload must be an array"))?;
        if flat.len() % 2 != 0 {
            return Err(GraphSonError::decode(
                "map payload must hold an even number of entries",
            ));
        }
        let mut entries = Vec::with_capacity(flat.len() / 2);
        for pair in flat.chunks(2) {
            entries.push((self.read(&pair[0])?, self.read(&pair[1])?));
        }
        Ok(GraphValue::Map(entries))
    }

    fn read_vertex(&self, payload: &JsonValue) -> Result<GraphValue> {
        let map = expect_object(payload, "vertex")?;
        let mut properties = Vec::new();
        if let Some(JsonValue::Object(by_key)) = map.get("properties") {
            for values in by_key.values() {
                let values = values
                    .as_array()
                    .ok_or_else(|| GraphSonError::decode("vertex properties must be arrays"))?;
                for value in values {
                    match self.read(value)? {
                        GraphValue::VertexProperty(vp) => properties.push(vp),
                        other => {
                            return Err(GraphSonError::decode(format!(
                                "expected vertex property, got {other:?}"
                            )))
                        }
                    }
                }
            }
        }
        Ok(GraphValue::Vertex(Vertex {
            id: Box::new(self.read_field(map, "id")?),
            label: string_field(map, "label").unwrap_or_else(|| "vertex".to_string()),
            properties,
        }))
    }

    fn read_edge(&self, payload: &JsonValue) -> Result<GraphValue> {
        let map = expect_object(payload, "edge")?;
        let mut properties = Vec::new();
        if let Some(JsonValue::Object(by_key)) = map.get("properties") {
            for value in by_key.values() {
                match self.read(value)? {
                    GraphValue::Property(p) => properties.push(p),
                    other => {
                        return Err(GraphSonError::decode(format!(
                            "expected edge property, got {other:?}"
                        )))
                    }
                }
            }
        }
        Ok(GraphValue::Edge(Edge {
            id: Box::new(self.read_field(map, "id")?),
            label: string_field(map, "label").unwrap_or_else(|| "edge".to_string()),
            in_v: Box::new(self.read_field(map, "inV")?),
            in_v_label: string_field(map, "inVLabel").unwrap_or_default(),
            out_v: Box::new(self.read_field(map, "outV")?),
            out_v_label: string_field(map, "outVLabel").unwrap_or_default(),
            properties,
        }))
    }

    fn read_vertex_property(&self, payload: &JsonValue) -> Result<GraphValue> {
        let map = expect_object(payload, "vertex property")?;
        Ok(GraphValue::VertexProperty(VertexProperty {
            id: Box::new(self.read_field(map, "id")?),
            label: string_field(map, "label").unwrap_or_default(),
            value: Box::new(self.read_field(map, "value")?),
        }))
    }

    fn read_property(&self, payload: &JsonValue) -> Result<GraphValue> {
        let map = expect_object(payload, "property")?;
        Ok(GraphValue::Property(Property {
            key: string_field(map, "key")
                .ok_or_else(|| GraphSonError::decode("property is missing 'key'"))?,
            value: Box::new(self.read_field(map, "value")?),
        }))
    }

    fn read_path(&self, payload: &JsonValue) -> Result<GraphValue> {
        let map = expect_object(payload, "path")?;
        let labels = match self.read_field(map, "labels")? {
            GraphValue::List(groups) => groups
                .into_iter()
                .map(|group| match group {
                    GraphValue::List(names) => names
                        .into_iter()
                        .map(|name| match name {
                            GraphValue::String(s) => Ok(s),
                            other => Err(GraphSonError::decode(format!(
                                "path labels must be strings, got {other:?}"
                            ))),
                        })
                        .collect::<Result<Vec<_>>>(),
                    other => Err(GraphSonError::decode(format!(
                        "path labels must be lists, got {other:?}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(GraphSonError::decode(format!(
                    "path labels must be a list, got {other:?}"
                )))
            }
        };
        let objects = match self.read_field(map, "objects")? {
            GraphValue::List(objects) => objects,
            other => {
                return Err(GraphSonError::decode(format!(
                    "path objects must be a list, got {other:?}"
                )))
            }
        };
        Ok(GraphValue::Path(Path { labels, objects }))
    }

    fn read_traverser(&self, payload: &JsonValue) -> Result<GraphValue> {
        let map = expect_object(payload, "traverser")?;
        let object = self.read_field(map, "value")?;
        let bulk = match map.get("bulk") {
            None => 1,
            Some(bulk) => match self.read(bulk)?.as_i64() {
                Some(n) if n > 0 => n as u64,
                _ => 1,
            },
        };
        Ok(GraphValue::Traverser(Box::new(Traverser::new(
            object, bulk,
        ))))
    }

    fn read_field(&self, map: &Map<String, JsonValue>, key: &str) -> Result<GraphValue> {
        match map.get(key) {
            Some(value) => self.read(value),
            None => Ok(GraphValue::Null),
        }
    }
}

fn read_number(n: &serde_json::Number) -> Result<GraphValue> {
    if let Some(i) = n.as_i64() {
        return Ok(match i32::try_from(i) {
            Ok(small) => GraphValue::Int32(small),
            Err(_) => GraphValue::Int64(i),
        });
    }
    n.as_f64()
        .map(GraphValue::Double)
        .ok_or_else(|| GraphSonError::decode(format!("unrepresentable number: {n}")))
}

fn expect_object<'a>(
    payload: &'a JsonValue,
    what: &str,
) -> Result<&'a Map<String, JsonValue>> {
    payload
        .as_object()
        .ok_or_else(|| GraphSonError::decode(format!("{what} payload must be an object")))
}

fn string_field(map: &Map<String, JsonValue>, key: &str) -> Option<String> {
    map.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reader() -> GraphSonReader {
        GraphSonReader::new(GraphSonVersion::V2, default_registry())
    }

    #[test]
    fn test_primitives_pass_through() {
        let r = reader();
        assert_eq!(r.read(&json!(null)).unwrap(), GraphValue::Null);
        assert_eq!(r.read(&json!(12)).unwrap(), GraphValue::Int32(12));
        assert_eq!(
            r.read(&json!(5_000_000_000i64)).unwrap(),
            GraphValue::Int64(5_000_000_000)
        );
        assert_eq!(r.read(&json!(1.5)).unwrap(), GraphValue::Double(1.5));
        assert_eq!(
            r.read(&json!("name")).unwrap(),
            GraphValue::String("name".to_string())
        );
    }

    #[test]
    fn test_registered_tag_resolves_codec() {
        let decoded = reader()
            .read(&json!({"@type": "g:UUID", "@value": "9907570a-3ac5-4ec2-8894-9530e0659d83"}))
            .unwrap();
        assert!(matches!(decoded, GraphValue::Uuid(_)));
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let wire = json!({"@type": "server:Duration", "@value": "PT5S"});
        let decoded = reader().read(&wire).unwrap();
        assert_eq!(
            decoded,
            GraphValue::Tagged(TaggedValue::new("server:Duration", json!("PT5S")))
        );
    }

    #[test]
    fn test_vertex_decoding() {
        let wire = json!({
            "@type": "g:Vertex",
            "@value": {
                "id": {"@type": "g:Int32", "@value": 1},
                "label": "person",
                "properties": {
                    "name": [
                        {"@type": "g:VertexProperty",
                         "@value": {"id": {"@type": "g:Int64", "@value": 0}, "label": "name", "value": "marko"}}
                    ]
                }
            }
        });
        let GraphValue::Vertex(vertex) = reader().read(&wire).unwrap() else {
            panic!("expected vertex");
        };
        assert_eq!(*vertex.id, GraphValue::Int32(1));
        assert_eq!(vertex.label, "person");
        assert_eq!(vertex.properties.len(), 1);
        assert_eq!(
            *vertex.properties[0].value,
            GraphValue::String("marko".to_string())
        );
    }

    #[test]
    fn test_edge_decodes_through_structure_handling() {
        // The legacy driver edge mapping is removed from the registry, so
        // adjacency labels survive decoding.
        let wire = json!({
            "@type": "g:Edge",
            "@value": {
                "id": 7,
                "label": "knows",
                "inV": 2, "inVLabel": "person",
                "outV": 1, "outVLabel": "person"
            }
        });
        let GraphValue::Edge(edge) = reader().read(&wire).unwrap() else {
            panic!("expected edge");
        };
        assert_eq!(edge.label, "knows");
        assert_eq!(edge.in_v_label, "person");
        assert_eq!(edge.out_v_label, "person");
    }

    #[test]
    fn test_traverser_bulk_defaults_to_one() {
        let wire = json!({"@type": "g:Traverser", "@value": {"value": "a"}});
        let GraphValue::Traverser(t) = reader().read(&wire).unwrap() else {
            panic!("expected traverser");
        };
        assert_eq!(t.bulk, 1);
    }

    #[test]
    fn test_graphson3_map_decoding() {
        let r = GraphSonReader::new(GraphSonVersion::V3, default_registry());
        let wire = json!({"@type": "g:Map", "@value": ["name", "marko", "age", 29]});
        let GraphValue::Map(entries) = r.read(&wire).unwrap() else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].1, GraphValue::Int32(29));
    }

    #[test]
    fn test_parse_row_reads_result_and_bulk() {
        let row = r#"{"result": {"@type": "g:Int64", "@value": 42}, "bulk": 3}"#;
        let traverser = reader().parse_row(row).unwrap();
        assert_eq!(traverser.object, GraphValue::Int64(42));
        assert_eq!(traverser.bulk, 3);
    }

    #[test]
    fn test_parse_row_defaults_bulk() {
        let row = r#"{"result": "ok"}"#;
        let traverser = reader().parse_row(row).unwrap();
        assert_eq!(traverser.bulk, 1);
    }

    #[test]
    fn test_parse_row_rejects_missing_result() {
        assert!(reader().parse_row(r#"{"bulk": 2}"#).is_err());
        assert!(reader().parse_row("[1, 2]").is_err());
    }
}
