//! textgraph-core: Shared types, schema formatting, and error handling for the
//! text-to-knowledge-graph pipeline.
//!
//! This crate provides the foundational pieces used by the other crates:
//! - Schema descriptions and their compact textual form for model prompts
//! - Graph records as read back from the store
//! - Visual nodes and edges fed to the renderer
//! - The pipeline error taxonomy

pub mod error;
pub mod schema;
pub mod types;

pub use error::TextGraphError;
pub use types::{
    GraphRecord, NodeRole, PropertyMap, Relationship, RelationshipPattern, ResultRow,
    SchemaDescription, VisualEdge, VisualNode,
};
