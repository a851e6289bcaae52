//! GraphSON writer: domain values to wire JSON.
//!
//! The writer consults the registry first (variant tag to codec), then falls
//! back to the protocol's core forms: primitives stay plain JSON in both
//! versions, while lists and maps are tagged in GraphSON3 only.

use crate::bytecode::{Bytecode, Instruction};
use crate::codec::tagged;
use crate::error::{GraphSonError, Result};
use crate::predicates::Predicate;
use crate::protocol::GraphSonVersion;
use crate::registry::Registry;
use crate::tags;
use crate::value::GraphValue;
use serde_json::{json, Map, Value as JsonValue};
use std::sync::Arc;

/// A protocol-versioned GraphSON writer over a shared registry.
pub struct GraphSonWriter {
    version: GraphSonVersion,
    registry: Arc<Registry>,
}

impl GraphSonWriter {
    /// Create a writer for the given protocol version.
    pub fn new(version: GraphSonVersion, registry: Arc<Registry>) -> Self {
        Self { version, registry }
    }

    /// The protocol version this writer produces.
    pub fn version(&self) -> GraphSonVersion {
        self.version
    }

    /// Serialize a domain value to wire text.
    pub fn write(&self, value: &GraphValue) -> Result<String> {
        let adapted = self.adapt(value)?;
        serde_json::to_string(&adapted).map_err(|e| GraphSonError::encode(e.to_string()))
    }

    /// Serialize traversal bytecode to wire text.
    pub fn write_bytecode(&self, bytecode: &Bytecode) -> Result<String> {
        let adapted = self.encode_bytecode(bytecode)?;
        serde_json::to_string(&adapted).map_err(|e| GraphSonError::encode(e.to_string()))
    }

    /// Adapt a domain value into its wire JSON form.
    pub fn adapt(&self, value: &GraphValue) -> Result<JsonValue> {
        if let Some(codec) = self.registry.codec_for_value(value) {
            return codec.encode(value, self);
        }
        self.core_adapt(value)
    }

    pub(crate) fn encode_bytecode(&self, bytecode: &Bytecode) -> Result<JsonValue> {
        let mut body = Map::new();
        if !bytecode.sources().is_empty() {
            body.insert(
                "source".to_string(),
                self.encode_instructions(bytecode.sources())?,
            );
        }
        if !bytecode.steps().is_empty() {
            body.insert(
                "step".to_string(),
                self.encode_instructions(bytecode.steps())?,
            );
        }
        Ok(tagged(tags::BYTECODE, JsonValue::Object(body)))
    }

    fn encode_instructions(&self, instructions: &[Instruction]) -> Result<JsonValue> {
        let mut rows = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            let mut row = Vec::with_capacity(instruction.args.len() + 1);
            row.push(JsonValue::String(instruction.operator.clone()));
            for arg in &instruction.args {
                row.push(self.adapt(arg)?);
            }
            rows.push(JsonValue::Array(row));
        }
        Ok(JsonValue::Array(rows))
    }

    /// The protocol's list form: a plain array in GraphSON2, tagged in 3.
    pub(crate) fn list_form(&self, items: Vec<JsonValue>) -> JsonValue {
        match self.version {
            GraphSonVersion::V2 => JsonValue::Array(items),
            GraphSonVersion::V3 => tagged(tags::LIST, JsonValue::Array(items)),
        }
    }

    fn core_adapt(&self, value: &GraphValue) -> Result<JsonValue> {
        match value {
            GraphValue::Null => Ok(JsonValue::Null),
            GraphValue::Bool(b) => Ok(json!(b)),
            GraphValue::Int32(i) => Ok(json!(i)),
            GraphValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(JsonValue::Number)
                .ok_or_else(|| GraphSonError::encode("non-finite numbers are not encodable")),
            GraphValue::String(s) => Ok(json!(s)),
            GraphValue::Enum(e) => Ok(tagged(&format!("g:{}", e.enum_type), json!(e.value))),
            GraphValue::Bytecode(bytecode) => self.encode_bytecode(bytecode),
            GraphValue::Predicate(p) => self.encode_base_predicate(p),
            GraphValue::List(items) => {
                let adapted = items
                    .iter()
                    .map(|item| self.adapt(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.list_form(adapted))
            }
            GraphValue::Map(entries) => self.encode_map(entries),
            GraphValue::Tagged(t) => Ok(tagged(&t.tag, t.value.clone())),
            other => Err(GraphSonError::encode(format!(
                "value is not encodable: {other:?}"
            ))),
        }
    }

    /// The base library's own predicate form, used for operator spellings
    /// the server understands natively.
    fn encode_base_predicate(&self, predicate: &Predicate) -> Result<JsonValue> {
        let mut body = Map::new();
        body.insert("predicate".to_string(), json!(predicate.operator));
        let adapted = match &predicate.other {
            None => self.adapt(&predicate.value)?,
            Some(other) => {
                JsonValue::Array(vec![self.adapt(&predicate.value)?, self.adapt(other)?])
            }
        };
        body.insert("value".to_string(), adapted);
        Ok(tagged(tags::P, JsonValue::Object(body)))
    }

    fn encode_map(&self, entries: &[(GraphValue, GraphValue)]) -> Result<JsonValue> {
        match self.version {
            GraphSonVersion::V2 => {
                // GraphSON2 maps are plain JSON objects, so keys must be
                // strings.
                let mut map = Map::new();
                for (key, value) in entries {
                    let GraphValue::String(key) = key else {
                        return Err(GraphSonError::encode("GraphSON2 map keys must be strings"));
                    };
                    map.insert(key.clone(), self.adapt(value)?);
                }
                Ok(JsonValue::Object(map))
            }
            GraphSonVersion::V3 => {
                let mut flat = Vec::with_capacity(entries.len() * 2);
                for (key, value) in entries {
                    flat.push(self.adapt(key)?);
                    flat.push(self.adapt(value)?);
                }
                Ok(tagged(tags::MAP, JsonValue::Array(flat)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use crate::value::EnumValue;
    use pretty_assertions::assert_eq;

    fn v2() -> GraphSonWriter {
        GraphSonWriter::new(GraphSonVersion::V2, default_registry())
    }

    fn v3() -> GraphSonWriter {
        GraphSonWriter::new(GraphSonVersion::V3, default_registry())
    }

    #[test]
    fn test_primitives_stay_plain() {
        let writer = v2();
        assert_eq!(writer.adapt(&GraphValue::Int32(12)).unwrap(), json!(12));
        assert_eq!(
            writer.adapt(&GraphValue::String("Matt".into())).unwrap(),
            json!("Matt")
        );
        assert_eq!(writer.adapt(&GraphValue::Bool(true)).unwrap(), json!(true));
        assert_eq!(writer.adapt(&GraphValue::Null).unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_enum_value_form() {
        let writer = v2();
        assert_eq!(
            writer
                .adapt(&GraphValue::Enum(EnumValue::order("decr")))
                .unwrap(),
            json!({"@type": "g:Order", "@value": "decr"})
        );
    }

    #[test]
    fn test_list_tagging_differs_by_version() {
        let list = GraphValue::List(vec![GraphValue::Int32(1), GraphValue::Int32(2)]);
        assert_eq!(v2().adapt(&list).unwrap(), json!([1, 2]));
        assert_eq!(
            v3().adapt(&list).unwrap(),
            json!({"@type": "g:List", "@value": [1, 2]})
        );
    }

    #[test]
    fn test_map_tagging_differs_by_version() {
        let map = GraphValue::Map(vec![(GraphValue::from("age"), GraphValue::Int32(8))]);
        assert_eq!(v2().adapt(&map).unwrap(), json!({"age": 8}));
        assert_eq!(
            v3().adapt(&map).unwrap(),
            json!({"@type": "g:Map", "@value": ["age", 8]})
        );
    }

    #[test]
    fn test_non_finite_double_is_rejected() {
        assert!(v2().adapt(&GraphValue::Double(f64::NAN)).is_err());
    }

    #[test]
    fn test_bytecode_form() {
        let bytecode = Bytecode::new()
            .step("addV", vec!["person".into()])
            .step("property", vec!["age".into(), 12.into()]);
        assert_eq!(
            v2().encode_bytecode(&bytecode).unwrap(),
            json!({
                "@type": "g:Bytecode",
                "@value": {"step": [["addV", "person"], ["property", "age", 12]]}
            })
        );
    }

    #[test]
    fn test_bytecode_includes_sources_when_present() {
        let bytecode = Bytecode::new()
            .source("withComputer", vec![])
            .step("V", vec![]);
        assert_eq!(
            v2().encode_bytecode(&bytecode).unwrap(),
            json!({
                "@type": "g:Bytecode",
                "@value": {"source": [["withComputer"]], "step": [["V"]]}
            })
        );
    }

    #[test]
    fn test_excluded_predicate_uses_base_form() {
        let within = GraphValue::Predicate(Predicate::within(vec!["a".into(), "b".into()]));
        assert_eq!(
            v2().adapt(&within).unwrap(),
            json!({"@type": "g:P", "@value": {"predicate": "within", "value": ["a", "b"]}})
        );
    }

    #[test]
    fn test_unknown_tagged_value_reencodes_verbatim() {
        let value = GraphValue::Tagged(crate::value::TaggedValue::new(
            "server:Custom",
            json!({"a": 1}),
        ));
        assert_eq!(
            v2().adapt(&value).unwrap(),
            json!({"@type": "server:Custom", "@value": {"a": 1}})
        );
    }
}
