use thiserror::Error;

/// Top-level error type for one pipeline invocation.
#[derive(Error, Debug)]
pub enum TextGraphError {
    /// Database unreachable or statement rejected.
    #[error("Graph store error: {0}")]
    Store(String),

    /// Schema introspection returned no row or a malformed one.
    #[error("Schema unavailable: {0}")]
    SchemaUnavailable(String),

    /// The language-model call failed.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The model output did not start with the upsert keyword.
    #[error("Generated Cypher statement does not start with 'MERGE'")]
    InvalidStatement { statement: String },

    /// Building or serializing the graph view failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration could not be loaded or the HTTP client could not be built.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TextGraphError {
    /// User-visible status string for a failed processing pass.
    pub fn status_message(&self) -> String {
        format!("Error: {self}")
    }
}

pub type Result<T> = std::result::Result<T, TextGraphError>;
