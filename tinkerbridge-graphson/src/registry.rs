//! Serializer registry: the immutable tag-to-codec table.
//!
//! The table is an explicit overlay computed once: the host driver's base
//! codec table (the scalar set plus its legacy edge mapping), overlaid with
//! the extension codecs, minus the `g:Edge` entry. Nothing mutates the table
//! after construction, so it is shared freely across concurrent reads.

use crate::codec::{self, BatchCodec, DriverEdgeCodec, DsePredicateCodec, GraphCodec};
use crate::error::{GraphSonError, Result};
use crate::tags;
use crate::value::GraphValue;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Registry construction options.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Comparison operators routed to the base `g:P` encoding instead of the
    /// extension predicate codec. The server-native set has changed across
    /// protocol generations, so it is configuration rather than a rule:
    /// override it to match the target server.
    pub excluded_predicate_operators: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            excluded_predicate_operators: vec!["within".to_string(), "without".to_string()],
        }
    }
}

/// The tag-to-codec table used by both the writer and the reader.
pub struct Registry {
    by_tag: HashMap<String, Box<dyn GraphCodec>>,
    excluded_predicate_operators: Vec<String>,
}

impl Registry {
    /// Build the default registry.
    pub fn build() -> Result<Self> {
        Self::with_config(RegistryConfig::default())
    }

    /// Build a registry with explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        let mut registry = Self {
            by_tag: HashMap::new(),
            excluded_predicate_operators: config.excluded_predicate_operators,
        };

        // Base driver table: the scalar set plus the legacy edge mapping.
        for entry in codec::scalar_codecs() {
            registry.insert(entry)?;
        }
        registry.insert(Box::new(DriverEdgeCodec))?;

        // Extension codecs overlay the base table, later entries winning on
        // tag collision.
        registry.insert(Box::new(DsePredicateCodec))?;
        registry.insert(Box::new(BatchCodec))?;

        // The legacy edge mapping would shadow the structure-element
        // decoding and drop incident vertex labels. Remove it so edges
        // decode through the standard structure handling.
        registry.by_tag.remove(tags::EDGE);

        Ok(registry)
    }

    fn insert(&mut self, entry: Box<dyn GraphCodec>) -> Result<()> {
        if entry.tag().is_empty() {
            return Err(GraphSonError::config(
                "codec must provide a non-empty wire tag",
            ));
        }
        self.by_tag.insert(entry.tag().to_string(), entry);
        Ok(())
    }

    /// Look a codec up by wire tag.
    pub fn codec(&self, tag: &str) -> Option<&dyn GraphCodec> {
        self.by_tag.get(tag).map(|c| c.as_ref())
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Encode-side dispatch: the variant's wire tag, then the codec
    /// registered under it. Values without a registered tag fall through to
    /// the writer's core forms.
    pub(crate) fn codec_for_value(&self, value: &GraphValue) -> Option<&dyn GraphCodec> {
        let codec = self.dispatch_tag(value).and_then(|tag| self.codec(tag))?;
        debug_assert!(
            codec.can_encode(value),
            "dispatch tag disagrees with codec applicability for {value:?}"
        );
        Some(codec)
    }

    fn dispatch_tag(&self, value: &GraphValue) -> Option<&'static str> {
        let tag = match value {
            GraphValue::Uuid(_) => tags::UUID,
            GraphValue::Int64(_) => tags::INT64,
            GraphValue::BigDecimal(_) => tags::BIG_DECIMAL,
            GraphValue::BigInt(_) => tags::BIG_INTEGER,
            GraphValue::Inet(_) => tags::INET_ADDRESS,
            GraphValue::LocalDate(_) => tags::LOCAL_DATE,
            GraphValue::LocalTime(_) => tags::LOCAL_TIME,
            GraphValue::Instant(_) => tags::INSTANT,
            GraphValue::Blob(_) => tags::BLOB,
            GraphValue::Point(_) => tags::POINT,
            GraphValue::LineString(_) => tags::LINE_STRING,
            GraphValue::Polygon(_) => tags::POLYGON,
            GraphValue::Distance(_) => tags::DISTANCE,
            GraphValue::GeoPredicate(_) | GraphValue::TextPredicate(_) => tags::DSE_P,
            GraphValue::Predicate(p) => {
                if self
                    .excluded_predicate_operators
                    .iter()
                    .any(|op| op == &p.operator)
                {
                    // Base-library spelling; the writer's core g:P form
                    // handles it.
                    return None;
                }
                tags::DSE_P
            }
            GraphValue::Batch(_) => tags::BATCH,
            // Removed from the table at build; falls through to the core
            // handling.
            GraphValue::Edge(_) => tags::EDGE,
            _ => return None,
        };
        Some(tag)
    }
}

/// The process-wide default registry, built once and shared.
pub fn default_registry() -> Arc<Registry> {
    static REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| Arc::new(Registry::build().expect("built-in codec table is valid")))
        .clone()
}
