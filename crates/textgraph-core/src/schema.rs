//! Compact textual form of a schema description, injected verbatim into the
//! model prompt.
//!
//! ```text
//! Nodes: Person, Company
//! Relationships: Person-WORKS_AT->Company
//! ```

use crate::types::SchemaDescription;

/// Format a schema as `Nodes: ...\nRelationships: ...`, preserving store order.
pub fn format_schema(schema: &SchemaDescription) -> String {
    let nodes = schema.node_labels.join(", ");
    let relationships = schema
        .relationships
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!("Nodes: {nodes}\nRelationships: {relationships}")
}
