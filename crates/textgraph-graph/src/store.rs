//! The graph store capability used by the pipeline.
//!
//! The pipeline only ever needs three things from a graph database. Keeping
//! them behind a trait lets another backend (or a test stub) stand in for
//! Neo4j without touching the pipeline.

use async_trait::async_trait;

use textgraph_core::{GraphRecord, ResultRow, SchemaDescription};

use crate::client::{GraphClient, GraphError};

/// Named statement parameters.
pub type Params = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute one statement and return its rows.
    async fn query(&self, statement: &str, params: Params) -> Result<Vec<ResultRow>, GraphError>;

    /// Introspect the node labels and relationship patterns present.
    async fn schema(&self) -> Result<SchemaDescription, GraphError>;

    /// Every node with at most one outgoing relationship per row. Unpaged.
    async fn all_records(&self) -> Result<Vec<GraphRecord>, GraphError>;
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn query(&self, statement: &str, params: Params) -> Result<Vec<ResultRow>, GraphError> {
        self.execute_statement(statement, &params).await
    }

    async fn schema(&self) -> Result<SchemaDescription, GraphError> {
        self.fetch_schema().await
    }

    async fn all_records(&self) -> Result<Vec<GraphRecord>, GraphError> {
        self.fetch_all_records().await
    }
}
