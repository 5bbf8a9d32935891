//! textgraph-pipeline: Turn free-form text into knowledge-graph updates.
//!
//! Captures the current graph schema, asks a language model for a
//! schema-aware Cypher `MERGE` statement, validates and executes it, then
//! rebuilds a renderable view of the whole graph.

pub mod config;
pub mod executor;
pub mod generator;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod statement;
pub mod view;

pub use config::AppConfig;
pub use generator::{LlmStatementGenerator, StatementGenerator};
pub use llm::{CompletionModel, OpenAiChatModel};
pub use pipeline::{InvocationOutput, Pipeline, ProcessOutcome};
pub use render::HtmlRenderer;
pub use view::GraphView;
