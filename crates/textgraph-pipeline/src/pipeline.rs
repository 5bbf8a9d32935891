//! The per-invocation pipeline.
//!
//! One invocation is two independent passes run to completion, in order:
//! processing (schema → generation → validation → execution) and rendering
//! (full read → view → document). A failed processing pass never prevents
//! the rendering pass from redrawing whatever is currently stored.

use textgraph_core::error::Result;
use textgraph_core::schema::format_schema;
use textgraph_core::ResultRow;
use textgraph_graph::GraphStore;

use crate::executor;
use crate::generator::StatementGenerator;
use crate::render::HtmlRenderer;
use crate::view::GraphView;

/// Status returned when there is no text to process.
pub const EMPTY_INPUT_STATUS: &str = "Please enter some text to process.";

/// User-visible result of a processing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub status: String,
    /// Raw rows of the executed statement; `None` unless it succeeded.
    pub rows: Option<Vec<ResultRow>>,
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        self.rows.is_some()
    }
}

/// Both presentation outputs of one invocation.
#[derive(Debug)]
pub struct InvocationOutput {
    pub outcome: ProcessOutcome,
    /// Rendered document, or the error that prevented it.
    pub graph: Result<String>,
}

pub struct Pipeline<S, G> {
    store: S,
    generator: G,
    renderer: HtmlRenderer,
}

impl<S, G> Pipeline<S, G>
where
    S: GraphStore,
    G: StatementGenerator,
{
    pub fn new(store: S, generator: G, renderer: HtmlRenderer) -> Self {
        Self {
            store,
            generator,
            renderer,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Run one full invocation: processing pass, then rendering pass.
    pub async fn invoke(&self, text: &str) -> InvocationOutput {
        let outcome = self.process_text(text).await;
        let graph = self.render_graph().await;
        InvocationOutput { outcome, graph }
    }

    /// Processing pass. Every failure becomes an `Error: ` status.
    pub async fn process_text(&self, text: &str) -> ProcessOutcome {
        if text.trim().is_empty() {
            return ProcessOutcome {
                status: EMPTY_INPUT_STATUS.to_string(),
                rows: None,
            };
        }

        match self.try_process(text).await {
            Ok(result) => ProcessOutcome {
                status: result.status,
                rows: Some(result.rows),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Processing pass failed");
                ProcessOutcome {
                    status: e.status_message(),
                    rows: None,
                }
            }
        }
    }

    async fn try_process(&self, text: &str) -> Result<executor::ExecutionResult> {
        let schema = self.schema_text().await?;
        let candidate = self.generator.generate(text, &schema).await?;
        executor::execute(&self.store, &candidate).await
    }

    /// The current schema in its prompt form.
    pub async fn schema_text(&self) -> Result<String> {
        let schema = self.store.schema().await?;
        Ok(format_schema(&schema))
    }

    /// Rendering pass over the data currently stored.
    pub async fn render_graph(&self) -> Result<String> {
        let records = self.store.all_records().await?;
        let view = GraphView::build(&records);
        self.renderer.render(&view)
    }
}
