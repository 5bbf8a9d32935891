//! Graph-mutation statements: fence stripping and the upsert precondition.

use textgraph_core::error::{Result, TextGraphError};

/// Keyword every accepted statement must start with (case-insensitive).
pub const UPSERT_KEYWORD: &str = "MERGE";

const FENCE: &str = "```";

/// Language tags a model may put on the opening fence.
const FENCE_LANGUAGES: [&str; 6] = ["cypher", "neo4j", "sql", "text", "plaintext", "graphql"];

/// Remove code-fence markup and surrounding whitespace from a model reply.
///
/// Every triple-backtick marker is dropped. When the reply opens with a fence
/// carrying a known language tag (```` ```cypher ````), the tag goes too.
/// Anything else on the fence line is kept as statement text.
pub fn strip_code_fences(raw: &str) -> String {
    let mut body = raw.trim();
    if let Some(rest) = body.strip_prefix(FENCE) {
        body = match rest.split_once('\n') {
            Some((tag, after)) if is_language_tag(tag) => after,
            _ => rest,
        };
    }
    body.replace(FENCE, "").trim().to_string()
}

fn is_language_tag(tag: &str) -> bool {
    let tag = tag.trim();
    FENCE_LANGUAGES
        .iter()
        .any(|lang| tag.eq_ignore_ascii_case(lang))
}

/// A statement that passed the upsert-keyword check.
///
/// Only constructed through [`GraphMutationStatement::parse`]; executed at
/// most once and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphMutationStatement(String);

impl GraphMutationStatement {
    /// Strip fences/whitespace from a candidate and check that it begins with
    /// the upsert keyword.
    pub fn parse(candidate: &str) -> Result<Self> {
        let statement = strip_code_fences(candidate);
        if starts_with_keyword(&statement) {
            Ok(Self(statement))
        } else {
            Err(TextGraphError::InvalidStatement { statement })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn starts_with_keyword(statement: &str) -> bool {
    statement
        .get(..UPSERT_KEYWORD.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(UPSERT_KEYWORD))
}
