//! Conversions between Bolt values and JSON property maps.

use std::collections::HashMap;

use neo4rs::{BoltNull, BoltType};
use serde_json::Value;

use textgraph_core::{PropertyMap, ResultRow};

use crate::client::GraphError;

/// Convert a JSON parameter value into a Bolt value for query binding.
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::from(i),
            None => BoltType::from(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => BoltType::from(s.clone()),
        Value::Array(items) => BoltType::from(items.iter().map(json_to_bolt).collect::<Vec<_>>()),
        Value::Object(map) => BoltType::from(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_bolt(v)))
                .collect::<HashMap<String, BoltType>>(),
        ),
    }
}

/// Extract every property of a node.
pub fn node_properties(node: &neo4rs::Node) -> PropertyMap {
    let mut props = PropertyMap::new();
    for key in node.keys() {
        if let Some(value) = property_value(node.get::<Value>(key).ok(), || node.get(key).ok()) {
            props.insert(key.to_string(), value);
        } else {
            tracing::trace!(key, "Skipping node property with no JSON form");
        }
    }
    props
}

/// Extract every property of a relationship.
pub fn relation_properties(rel: &neo4rs::Relation) -> PropertyMap {
    let mut props = PropertyMap::new();
    for key in rel.keys() {
        if let Some(value) = property_value(rel.get::<Value>(key).ok(), || rel.get(key).ok()) {
            props.insert(key.to_string(), value);
        }
    }
    props
}

/// Temporal and spatial values do not deserialize straight into JSON; fall
/// back to their string form.
fn property_value(json: Option<Value>, as_string: impl FnOnce() -> Option<String>) -> Option<Value> {
    json.or_else(|| as_string().map(Value::String))
}

/// Convert a result row of an arbitrary statement into a JSON row.
pub fn row_to_json(row: &neo4rs::Row) -> Result<ResultRow, GraphError> {
    row.to::<ResultRow>()
        .map_err(|e| GraphError::Serialization(format!("Failed to deserialize result row: {e}")))
}
