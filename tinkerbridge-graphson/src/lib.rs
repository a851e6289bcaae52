//! GraphSON 2/3 serialization for graph traversal bytecode.
//!
//! This crate translates between an in-memory traversal representation
//! ([`Bytecode`]) plus its argument values and the GraphSON wire format. It
//! provides:
//!
//! - A closed table of scalar codecs (UUID, 64-bit integers, arbitrary
//!   precision numbers, timestamps, blobs, inet addresses, geometries)
//! - Geo and text-search predicate types with their wire encodings
//! - Atomic multi-traversal batches
//! - A serializer registry and per-protocol writer/reader pairs
//!
//! # Example
//!
//! ```
//! use tinkerbridge_graphson::{query_from_traversal, Bytecode};
//!
//! let traversal = Bytecode::new().step("V", vec![]);
//! let query = query_from_traversal(&traversal, None).unwrap();
//! assert_eq!(query, r#"{"@type":"g:Bytecode","@value":{"step":[["V"]]}}"#);
//! ```

pub mod bytecode;
pub mod codec;
pub mod error;
pub mod geometry;
pub mod predicates;
pub mod protocol;
pub mod reader;
pub mod registry;
pub mod structure;
pub mod value;
pub mod writer;

pub use bytecode::{Bytecode, Instruction, TraversalBatch};
pub use codec::GraphCodec;
pub use error::{GraphSonError, Result};
pub use protocol::{
    parse_row, query_from_batch, query_from_traversal, reader_for, writer_for, GraphSonVersion,
    GRAPHSON_1_0, GRAPHSON_2_0, GRAPHSON_3_0,
};
pub use reader::GraphSonReader;
pub use registry::{default_registry, Registry, RegistryConfig};
pub use structure::{Edge, Path, Property, Traverser, Vertex, VertexProperty};
pub use value::{EnumValue, GraphValue, TaggedValue};
pub use writer::GraphSonWriter;

/// Key carrying the wire tag in a tagged JSON value.
pub const GRAPHSON_TYPE_KEY: &str = "@type";

/// Key carrying the payload in a tagged JSON value.
pub const GRAPHSON_VALUE_KEY: &str = "@value";

/// Wire tags for every type this crate encodes or decodes.
pub mod tags {
    /// UUID scalar.
    pub const UUID: &str = "g:UUID";
    /// 64-bit integer scalar.
    pub const INT64: &str = "g:Int64";
    /// Arbitrary precision decimal scalar.
    pub const BIG_DECIMAL: &str = "gx:BigDecimal";
    /// Arbitrary precision integer scalar.
    pub const BIG_INTEGER: &str = "gx:BigInteger";
    /// Inet address scalar.
    pub const INET_ADDRESS: &str = "gx:InetAddress";
    /// Local date scalar.
    pub const LOCAL_DATE: &str = "gx:LocalDate";
    /// Local time scalar.
    pub const LOCAL_TIME: &str = "gx:LocalTime";
    /// Instant scalar (ISO-8601).
    pub const INSTANT: &str = "gx:Instant";
    /// Binary blob scalar (base64).
    pub const BLOB: &str = "dse:Blob";
    /// Point geometry (well-known text).
    pub const POINT: &str = "dse:Point";
    /// Line string geometry (well-known text).
    pub const LINE_STRING: &str = "dse:LineString";
    /// Polygon geometry (well-known text).
    pub const POLYGON: &str = "dse:Polygon";
    /// Distance (circular area) value.
    pub const DISTANCE: &str = "dse:Distance";
    /// Extension predicate.
    pub const DSE_P: &str = "dse:P";
    /// Base-library predicate.
    pub const P: &str = "g:P";
    /// Traversal batch. Namespaced to collide with neither the base
    /// library's nor the server's list tags.
    pub const BATCH: &str = "client:batch";
    /// Traversal bytecode.
    pub const BYTECODE: &str = "g:Bytecode";
    /// 32-bit integer.
    pub const INT32: &str = "g:Int32";
    /// Double precision float.
    pub const DOUBLE: &str = "g:Double";
    /// Single precision float.
    pub const FLOAT: &str = "g:Float";
    /// List container (GraphSON3).
    pub const LIST: &str = "g:List";
    /// Set container (GraphSON3).
    pub const SET: &str = "g:Set";
    /// Map container (GraphSON3).
    pub const MAP: &str = "g:Map";
    /// Vertex structure element.
    pub const VERTEX: &str = "g:Vertex";
    /// Edge structure element.
    pub const EDGE: &str = "g:Edge";
    /// Vertex property structure element.
    pub const VERTEX_PROPERTY: &str = "g:VertexProperty";
    /// Edge property structure element.
    pub const PROPERTY: &str = "g:Property";
    /// Traversal path.
    pub const PATH: &str = "g:Path";
    /// Traversal result with repetition count.
    pub const TRAVERSER: &str = "g:Traverser";
}
