//! Statement generation: input text + formatted schema → candidate statement.

use async_trait::async_trait;

use textgraph_core::error::Result;

use crate::llm::CompletionModel;
use crate::prompt;
use crate::statement::strip_code_fences;

/// Produces a candidate graph-mutation statement for a piece of text.
///
/// The candidate is not validated here; see [`crate::executor`].
#[async_trait]
pub trait StatementGenerator: Send + Sync {
    async fn generate(&self, text: &str, schema: &str) -> Result<String>;
}

/// Generator backed by a single language-model reasoning call.
pub struct LlmStatementGenerator<M> {
    model: M,
}

impl<M: CompletionModel> LlmStatementGenerator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

#[async_trait]
impl<M: CompletionModel> StatementGenerator for LlmStatementGenerator<M> {
    async fn generate(&self, text: &str, schema: &str) -> Result<String> {
        let user = prompt::build_user_prompt(&prompt::collapse_newlines(text), schema);
        tracing::info!(
            model = self.model.model_id(),
            prompt_len = user.len(),
            "Requesting statement from language model"
        );

        let reply = self.model.complete(prompt::INSTRUCTIONS, &user).await?;
        let statement = strip_code_fences(prompt::extract_statement(&reply));

        tracing::info!(statement_len = statement.len(), "Statement generated");
        tracing::debug!(%statement, "Generated statement");
        Ok(statement)
    }
}
