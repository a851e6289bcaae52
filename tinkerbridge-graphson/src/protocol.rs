//! Protocol version selection and the query rendering entry points.
//!
//! Two GraphSON versions are supported on the wire. Writer/reader pairs are
//! built once from the shared registry; the selectors fall back to
//! GraphSON2 (the most widely supported version), while the explicit
//! rendering entry points treat an unsupported protocol literal as a usage
//! error.

use crate::bytecode::{Bytecode, TraversalBatch};
use crate::error::{GraphSonError, Result};
use crate::reader::GraphSonReader;
use crate::registry::default_registry;
use crate::structure::Traverser;
use crate::value::GraphValue;
use crate::writer::GraphSonWriter;
use std::sync::OnceLock;
use tracing::debug;

/// GraphSON 1.0 protocol literal. Recognized for parity with the upstream
/// protocol enumeration, but not a supported rendering target.
pub const GRAPHSON_1_0: &str = "graphson-1.0";

/// GraphSON 2.0 protocol literal.
pub const GRAPHSON_2_0: &str = "graphson-2.0";

/// GraphSON 3.0 protocol literal.
pub const GRAPHSON_3_0: &str = "graphson-3.0";

/// A supported GraphSON wire version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphSonVersion {
    V2,
    V3,
}

impl GraphSonVersion {
    /// Map a protocol literal to its GraphSON version, if supported.
    pub fn from_protocol(protocol: &str) -> Option<Self> {
        match protocol {
            GRAPHSON_2_0 => Some(GraphSonVersion::V2),
            GRAPHSON_3_0 => Some(GraphSonVersion::V3),
            _ => None,
        }
    }

    /// The protocol literal for this version.
    pub fn protocol(self) -> &'static str {
        match self {
            GraphSonVersion::V2 => GRAPHSON_2_0,
            GraphSonVersion::V3 => GRAPHSON_3_0,
        }
    }
}

fn graphson2_writer() -> &'static GraphSonWriter {
    static WRITER: OnceLock<GraphSonWriter> = OnceLock::new();
    WRITER.get_or_init(|| GraphSonWriter::new(GraphSonVersion::V2, default_registry()))
}

fn graphson3_writer() -> &'static GraphSonWriter {
    static WRITER: OnceLock<GraphSonWriter> = OnceLock::new();
    WRITER.get_or_init(|| GraphSonWriter::new(GraphSonVersion::V3, default_registry()))
}

fn graphson2_reader() -> &'static GraphSonReader {
    static READER: OnceLock<GraphSonReader> = OnceLock::new();
    READER.get_or_init(|| GraphSonReader::new(GraphSonVersion::V2, default_registry()))
}

fn graphson3_reader() -> &'static GraphSonReader {
    static READER: OnceLock<GraphSonReader> = OnceLock::new();
    READER.get_or_init(|| GraphSonReader::new(GraphSonVersion::V3, default_registry()))
}

/// The writer for a protocol hint. Unrecognized or absent protocols fall
/// back to GraphSON2.
pub fn writer_for(protocol: Option<&str>) -> &'static GraphSonWriter {
    match protocol.and_then(GraphSonVersion::from_protocol) {
        Some(GraphSonVersion::V3) => graphson3_writer(),
        Some(GraphSonVersion::V2) => graphson2_writer(),
        None => {
            if let Some(p) = protocol {
                debug!(protocol = p, "unrecognized graph protocol, writing graphson-2.0");
            }
            graphson2_writer()
        }
    }
}

/// The reader for a protocol hint. Unrecognized or absent protocols fall
/// back to GraphSON2.
pub fn reader_for(protocol: Option<&str>) -> &'static GraphSonReader {
    match protocol.and_then(GraphSonVersion::from_protocol) {
        Some(GraphSonVersion::V3) => graphson3_reader(),
        _ => graphson2_reader(),
    }
}

fn strict_writer(protocol: Option<&str>) -> Result<&'static GraphSonWriter> {
    match protocol {
        None => Ok(graphson2_writer()),
        Some(p) => match GraphSonVersion::from_protocol(p) {
            Some(GraphSonVersion::V2) => Ok(graphson2_writer()),
            Some(GraphSonVersion::V3) => Ok(graphson3_writer()),
            None => Err(GraphSonError::UnsupportedProtocol {
                protocol: p.to_string(),
            }),
        },
    }
}

/// Render a traversal as wire text.
///
/// An absent protocol renders as GraphSON2; an explicit but unsupported
/// protocol literal is a usage error.
pub fn query_from_traversal(traversal: &Bytecode, protocol: Option<&str>) -> Result<String> {
    strict_writer(protocol)?.write_bytecode(traversal)
}

/// Render an ordered, non-empty sequence of traversals as one wire value,
/// letting multiple mutations go out in a single request.
pub fn query_from_batch(traversals: &[Bytecode], protocol: Option<&str>) -> Result<String> {
    let writer = strict_writer(protocol)?;
    let batch = TraversalBatch::new(traversals.to_vec())?;
    writer.write(&GraphValue::Batch(batch))
}

/// Decode one result row's embedded payload under a protocol hint.
pub fn parse_row(gremlin: &str, protocol: Option<&str>) -> Result<Traverser> {
    reader_for(protocol).parse_row(gremlin)
}
