//! Schema introspection, statement execution, and the full-graph scan.

use std::collections::HashMap;

use neo4rs::{query, Node, Relation, Row};
use serde::de::DeserializeOwned;

use textgraph_core::{
    GraphRecord, PropertyMap, Relationship, RelationshipPattern, ResultRow, SchemaDescription,
};

use crate::client::{GraphClient, GraphError};
use crate::convert::{json_to_bolt, node_properties, relation_properties, row_to_json};
use crate::store::Params;

const SCHEMA_QUERY: &str = "CALL db.schema.visualization()";

const ALL_RECORDS_QUERY: &str = "MATCH (n)
     OPTIONAL MATCH (n)-[r]->(m)
     RETURN n, r, m, type(r) AS rel_type";

impl GraphClient {
    // ── Statement Execution ──────────────────────────────────────

    /// Execute an arbitrary statement with named parameters and collect its rows.
    pub async fn execute_statement(
        &self,
        statement: &str,
        params: &Params,
    ) -> Result<Vec<ResultRow>, GraphError> {
        let mut q = query(statement);
        for (name, value) in params {
            q = q.param(name, json_to_bolt(value));
        }

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            results.push(row_to_json(row)?);
        }

        tracing::debug!(rows = results.len(), "Statement executed");
        Ok(results)
    }

    // ── Schema Introspection ─────────────────────────────────────

    /// Fetch node labels and relationship patterns via `db.schema.visualization()`.
    pub async fn fetch_schema(&self) -> Result<SchemaDescription, GraphError> {
        let row = self.query_one(query(SCHEMA_QUERY)).await?;
        let schema = schema_from_row(row.as_ref())?;

        tracing::info!(
            nodes = schema.node_labels.len(),
            relationships = schema.relationships.len(),
            "Schema fetched"
        );
        Ok(schema)
    }

    // ── Full-Graph Scan ──────────────────────────────────────────

    /// Read every node, each paired with at most one outgoing relationship per row.
    pub async fn fetch_all_records(&self) -> Result<Vec<GraphRecord>, GraphError> {
        let rows = self.query_rows(query(ALL_RECORDS_QUERY)).await?;
        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(records = records.len(), "Graph read");
        Ok(records)
    }
}

/// Decode the single row of the schema visualization procedure.
pub fn schema_from_row(row: Option<&Row>) -> Result<SchemaDescription, GraphError> {
    let row = row.ok_or_else(|| {
        GraphError::SchemaUnavailable("schema visualization returned no rows".to_string())
    })?;

    let nodes: Vec<Node> = row.get("nodes").map_err(|e| {
        GraphError::SchemaUnavailable(format!("missing or malformed `nodes`: {e}"))
    })?;
    let relationships: Vec<Relation> = row.get("relationships").map_err(|e| {
        GraphError::SchemaUnavailable(format!("missing or malformed `relationships`: {e}"))
    })?;

    let mut named_nodes = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let name: String = node.get("name").map_err(|e| {
            GraphError::SchemaUnavailable(format!("schema node without a name: {e}"))
        })?;
        named_nodes.push((node.id(), name));
    }

    let rel_triples: Vec<(i64, String, i64)> = relationships
        .iter()
        .map(|r| (r.start_node_id(), r.typ().to_string(), r.end_node_id()))
        .collect();

    schema_from_parts(&named_nodes, &rel_triples)
}

/// Decode one row of the full-graph scan.
///
/// `OPTIONAL MATCH` leaves `r`, `m` and `rel_type` null when a node has no
/// outgoing relationship; null is the only value read as absent.
pub fn record_from_row(row: &Row) -> Result<GraphRecord, GraphError> {
    let source: Node = row
        .get("n")
        .map_err(|e| GraphError::Serialization(format!("Failed to deserialize node: {e}")))?;
    let target: Option<Node> = optional_column(row, "m")?;
    let relation: Option<Relation> = optional_column(row, "r")?;
    let rel_type: Option<String> = optional_column(row, "rel_type")?;

    Ok(record_from_parts(
        node_properties(&source),
        rel_type,
        relation.as_ref().map(relation_properties).unwrap_or_default(),
        target.as_ref().map(node_properties),
    ))
}

fn optional_column<T>(row: &Row, column: &str) -> Result<Option<T>, GraphError>
where
    T: DeserializeOwned,
{
    row.get::<Option<T>>(column)
        .map_err(|e| GraphError::Serialization(format!("Malformed `{column}` column: {e}")))
}

/// Resolve relationship endpoints (by schema node id) into label patterns.
///
/// Order of both lists is kept exactly as returned by the store.
pub fn schema_from_parts(
    nodes: &[(i64, String)],
    relationships: &[(i64, String, i64)],
) -> Result<SchemaDescription, GraphError> {
    let names: HashMap<i64, &str> = nodes.iter().map(|(id, n)| (*id, n.as_str())).collect();

    let mut patterns = Vec::with_capacity(relationships.len());
    for (start, rel_type, end) in relationships {
        let (Some(source), Some(target)) = (names.get(start), names.get(end)) else {
            return Err(GraphError::SchemaUnavailable(format!(
                "relationship {rel_type} references an unknown schema node"
            )));
        };
        patterns.push(RelationshipPattern::new(*source, rel_type.clone(), *target));
    }

    Ok(SchemaDescription::new(
        nodes.iter().map(|(_, n)| n.clone()).collect(),
        patterns,
    ))
}

/// Assemble one scan row. A relationship only exists when its type does.
pub fn record_from_parts(
    source: PropertyMap,
    rel_type: Option<String>,
    rel_properties: PropertyMap,
    target: Option<PropertyMap>,
) -> GraphRecord {
    GraphRecord {
        source,
        relationship: rel_type.map(|kind| Relationship {
            kind,
            properties: rel_properties,
        }),
        target,
    }
}
