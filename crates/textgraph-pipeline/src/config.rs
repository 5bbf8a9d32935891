//! Configuration for the textgraph pipeline.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`TEXTGRAPH__` prefix, `__` separator)
//! 2. Config file (`textgraph.toml` by default)
//! 3. The conventional `NEO4J_*` / `OPENAI_API_KEY` variables
//! 4. Defaults

use serde::Deserialize;

use textgraph_core::error::{Result, TextGraphError};
use textgraph_graph::GraphConfig;

/// Top-level configuration, one section per collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub neo4j: GraphConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Language-model settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Chat-completions API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Output-length cap for one completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: f32,

    /// Request timeout in seconds (0 disables it).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Only required once a model call is made.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Visual theme and output location of the rendered graph.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_width")]
    pub width: String,
    #[serde(default = "default_height")]
    pub height: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default = "default_source_color")]
    pub source_color: String,
    #[serde(default = "default_target_color")]
    pub target_color: String,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_output_path() -> String {
    "graph.html".to_string()
}

fn default_width() -> String {
    "100%".to_string()
}

fn default_height() -> String {
    "600px".to_string()
}

fn default_background() -> String {
    "#222222".to_string()
}

fn default_font_color() -> String {
    "white".to_string()
}

fn default_source_color() -> String {
    "#FFA500".to_string()
}

fn default_target_color() -> String {
    "#00BFFF".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            width: default_width(),
            height: default_height(),
            background: default_background(),
            font_color: default_font_color(),
            source_color: default_source_color(),
            target_color: default_target_color(),
        }
    }
}

/// Unprefixed variables honoured as low-priority defaults.
const CONVENTIONAL_VARS: [(&str, &str); 4] = [
    ("NEO4J_URI", "neo4j.uri"),
    ("NEO4J_USER", "neo4j.user"),
    ("NEO4J_PASSWORD", "neo4j.password"),
    ("OPENAI_API_KEY", "llm.api_key"),
];

impl AppConfig {
    /// Load configuration from the process environment and `{file_prefix}.toml`.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with(file_prefix, |name| std::env::var(name).ok())
    }

    fn load_with(file_prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = config::Config::builder();
        for (key, value) in conventional_defaults(lookup) {
            builder = builder.set_default(key, value).map_err(config_error)?;
        }

        let cfg = builder
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("TEXTGRAPH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        cfg.try_deserialize().map_err(config_error)
    }
}

fn conventional_defaults(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    CONVENTIONAL_VARS
        .iter()
        .filter_map(|(var, key)| lookup(var).map(|value| (*key, value)))
        .collect()
}

fn config_error(err: config::ConfigError) -> TextGraphError {
    TextGraphError::Config(err.to_string())
}
