//! Graph view building: scan records → deduplicated visual nodes and edges.
//!
//! Node identity is resolved per appearance: `name`, else `id`, else a fresh
//! UUID. Nodes with neither property therefore get a different key on every
//! rebuild and are never merged with other appearances of themselves.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use textgraph_core::{GraphRecord, NodeRole, PropertyMap, VisualEdge, VisualNode};

/// The node/edge set handed to the renderer for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphView {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

impl GraphView {
    /// Build the view from a full-graph scan.
    ///
    /// Re-registering an identity key overwrites its label, tooltip and role
    /// with the latest record's values; the node keeps its first position.
    pub fn build(records: &[GraphRecord]) -> Self {
        let mut builder = ViewBuilder::default();

        for record in records {
            let source_id = builder.register(&record.source, NodeRole::Source);

            if let Some(target) = &record.target {
                let target_id = builder.register(target, NodeRole::Target);

                if let Some(rel) = &record.relationship {
                    builder.edges.push(VisualEdge {
                        from: source_id,
                        to: target_id,
                        label: rel.kind.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            nodes = builder.nodes.len(),
            edges = builder.edges.len(),
            "Graph view built"
        );
        Self {
            nodes: builder.nodes,
            edges: builder.edges,
        }
    }
}

#[derive(Default)]
struct ViewBuilder {
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    node_index: HashMap<String, usize>,
}

impl ViewBuilder {
    fn register(&mut self, props: &PropertyMap, role: NodeRole) -> String {
        let node = VisualNode {
            id: resolve_node_id(props),
            label: node_label(props),
            title: Value::Object(props.clone()).to_string(),
            role,
        };
        let id = node.id.clone();

        match self.node_index.get(&id) {
            Some(&idx) => self.nodes[idx] = node,
            None => {
                self.node_index.insert(id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
        id
    }
}

/// Identity key: `name`, else `id`, else a freshly generated UUID.
pub fn resolve_node_id(props: &PropertyMap) -> String {
    display_value(props, "name")
        .or_else(|| display_value(props, "id"))
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Display label: `name`, else `type`, else `Unknown`.
pub fn node_label(props: &PropertyMap) -> String {
    display_value(props, "name")
        .or_else(|| display_value(props, "type"))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// String form of a property, treating null, `false`, zero, and empty
/// strings/lists/maps as absent.
fn display_value(props: &PropertyMap, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}
