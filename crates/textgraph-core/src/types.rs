//! Core domain types for the textgraph pipeline.
//!
//! Everything here is transient: schema descriptions are recomputed on every
//! invocation and visual nodes/edges live only for one render pass.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Property mapping of a stored node or relationship (key → scalar or list).
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// One raw result row of an executed statement, keyed by column name.
pub type ResultRow = serde_json::Map<String, serde_json::Value>;

// ── Schema ────────────────────────────────────────────────────────

/// A `SourceLabel-RelType->TargetLabel` pattern present in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipPattern {
    pub source: String,
    pub rel_type: String,
    pub target: String,
}

impl RelationshipPattern {
    pub fn new(
        source: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            rel_type: rel_type.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for RelationshipPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}->{}", self.source, self.rel_type, self.target)
    }
}

/// Node labels and relationship patterns currently present in the graph.
///
/// Order and deduplication are exactly as produced by the store's schema
/// introspection; nothing is sorted or normalized afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub node_labels: Vec<String>,
    pub relationships: Vec<RelationshipPattern>,
}

impl SchemaDescription {
    pub fn new(node_labels: Vec<String>, relationships: Vec<RelationshipPattern>) -> Self {
        Self {
            node_labels,
            relationships,
        }
    }
}

// ── Graph Records ─────────────────────────────────────────────────

/// A relationship as read back from the store.
///
/// `kind` is the stored relationship type and is only ever used as a display
/// label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Relationship {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: PropertyMap::new(),
        }
    }
}

/// One row of a full-graph scan: a node plus an optional outgoing
/// relationship and its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub source: PropertyMap,
    pub relationship: Option<Relationship>,
    pub target: Option<PropertyMap>,
}

// ── Visual Types ──────────────────────────────────────────────────

/// Which end of a record a node was registered from; drives its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Source,
    Target,
}

/// A node ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualNode {
    /// Identity key used to deduplicate appearances within one render pass.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Hover text: the full property dump.
    pub title: String,
    pub role: NodeRole,
}

/// An edge ready for rendering, referencing nodes by identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}
