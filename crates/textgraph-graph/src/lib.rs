//! textgraph-graph: Neo4j client for the knowledge graph.
//!
//! All graph reads and writes of the pipeline flow through the [`GraphStore`]
//! capability: schema introspection, statement execution, and the full-graph
//! scan. [`GraphClient`] is the Neo4j-backed implementation.

pub mod client;
pub mod convert;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use store::{GraphStore, Params};
