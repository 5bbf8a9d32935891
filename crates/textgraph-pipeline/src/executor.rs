//! Statement validation and execution.
//!
//! The candidate is checked for the upsert keyword and, only if it passes,
//! sent to the store once, verbatim, with no parameters bound. Whatever text
//! the model embedded in the statement is trusted as-is.

use textgraph_core::error::Result;
use textgraph_core::ResultRow;
use textgraph_graph::{GraphStore, Params};

use crate::statement::GraphMutationStatement;

/// Status reported after a statement was executed.
pub const SUCCESS_STATUS: &str = "Success! Cypher statement executed";

/// Outcome of one executed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub status: String,
    pub rows: Vec<ResultRow>,
}

/// Validate a candidate statement and execute it against the store.
pub async fn execute<S>(store: &S, candidate: &str) -> Result<ExecutionResult>
where
    S: GraphStore + ?Sized,
{
    let statement = GraphMutationStatement::parse(candidate).map_err(|e| {
        tracing::warn!(candidate, "Rejected generated statement");
        e
    })?;

    let rows = store.query(statement.as_str(), Params::new()).await?;
    tracing::info!(rows = rows.len(), "Statement executed");

    Ok(ExecutionResult {
        status: SUCCESS_STATUS.to_string(),
        rows,
    })
}
