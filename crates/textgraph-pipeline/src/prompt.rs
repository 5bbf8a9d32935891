//! Prompt construction and reply parsing for statement generation.
//!
//! The model is asked to reason briefly and then emit the statement under a
//! `Statement:` field, with two named inputs: the text and the Neo4j schema.

/// Instruction sent as the system message of every generation call.
pub const INSTRUCTIONS: &str = "\
Create a Cypher MERGE statement that models every entity and relationship found in the text.
- Consult the provided schema and reuse existing or semantically similar node labels, properties and relationship types before inventing new ones.
- Use generic, coarse-grained categories for new node and relationship labels.
- The statement must begin with 'MERGE' and must not include any explanatory text.";

const STATEMENT_FIELD: &str = "Statement:";

/// Build the user message for one generation call.
pub fn build_user_prompt(text: &str, schema: &str) -> String {
    format!(
        "Follow the following format.\n\
         \n\
         Text: Text to model using nodes, properties and relationships.\n\
         Neo4j Schema: Current graph schema in Neo4j as a list of NODES and RELATIONSHIPS.\n\
         Reasoning: Let's think step by step in order to ${{produce the statement}}. We ...\n\
         Statement: Cypher statement to merge nodes and relationships found in the text.\n\
         \n\
         ---\n\
         \n\
         Text: {text}\n\
         Neo4j Schema: {schema}\n\
         Reasoning: Let's think step by step in order to"
    )
}

/// Collapse line breaks in the input text into single spaces.
pub fn collapse_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

/// Take the `Statement:` field of a reply, or the whole reply if the model
/// left the field label out.
pub fn extract_statement(reply: &str) -> &str {
    match reply.find(STATEMENT_FIELD) {
        Some(pos) => reply[pos + STATEMENT_FIELD.len()..].trim(),
        None => reply.trim(),
    }
}
