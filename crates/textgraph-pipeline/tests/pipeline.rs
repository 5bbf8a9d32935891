//! End-to-end pipeline scenarios against in-memory collaborators.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use textgraph_core::error::Result;
use textgraph_core::{
    GraphRecord, PropertyMap, Relationship, RelationshipPattern, ResultRow, SchemaDescription,
    TextGraphError,
};
use textgraph_graph::{GraphError, GraphStore, Params};
use textgraph_pipeline::config::RenderConfig;
use textgraph_pipeline::executor::SUCCESS_STATUS;
use textgraph_pipeline::pipeline::EMPTY_INPUT_STATUS;
use textgraph_pipeline::{HtmlRenderer, Pipeline, StatementGenerator};

const ALICE_MERGE: &str =
    "MERGE (a:Person {name:'Alice'})-[:WORKS_AT]->(b:Company {name:'Acme Corp'})";

fn props(value: serde_json::Value) -> PropertyMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => PropertyMap::new(),
    }
}

#[derive(Default)]
struct MemoryStore {
    schema: SchemaDescription,
    records: Vec<GraphRecord>,
    rows: Vec<ResultRow>,
    schema_down: bool,
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn query(
        &self,
        statement: &str,
        _params: Params,
    ) -> std::result::Result<Vec<ResultRow>, GraphError> {
        self.queries.lock().unwrap().push(statement.to_string());
        Ok(self.rows.clone())
    }

    async fn schema(&self) -> std::result::Result<SchemaDescription, GraphError> {
        if self.schema_down {
            return Err(GraphError::SchemaUnavailable(
                "procedure not found".to_string(),
            ));
        }
        Ok(self.schema.clone())
    }

    async fn all_records(&self) -> std::result::Result<Vec<GraphRecord>, GraphError> {
        Ok(self.records.clone())
    }
}

/// Returns a fixed reply and remembers what it was asked.
struct FixedGenerator {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FixedGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StatementGenerator for FixedGenerator {
    async fn generate(&self, text: &str, schema: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), schema.to_string()));
        self.reply.clone().map_err(TextGraphError::Generation)
    }
}

fn make_pipeline(
    store: MemoryStore,
    generator: FixedGenerator,
) -> Pipeline<MemoryStore, FixedGenerator> {
    Pipeline::new(store, generator, HtmlRenderer::new(RenderConfig::default()))
}

fn alice_record() -> GraphRecord {
    GraphRecord {
        source: props(json!({"name": "Alice"})),
        relationship: Some(Relationship::new("WORKS_AT")),
        target: Some(props(json!({"name": "Acme Corp"}))),
    }
}

#[tokio::test]
async fn test_alice_statement_executed_verbatim() {
    let store = MemoryStore {
        rows: vec![props(json!({"a": {"name": "Alice"}}))],
        ..Default::default()
    };
    let pipeline = make_pipeline(store, FixedGenerator::replying(ALICE_MERGE));

    let outcome = pipeline.process_text("Alice works at Acme Corp.").await;

    assert_eq!(outcome.status, SUCCESS_STATUS);
    assert_eq!(outcome.rows, Some(vec![props(json!({"a": {"name": "Alice"}}))]));
    assert_eq!(*pipeline.store().queries.lock().unwrap(), vec![ALICE_MERGE.to_string()]);

    let calls = pipeline.generator().calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Alice works at Acme Corp.");
    assert_eq!(calls[0].1, "Nodes: \nRelationships: ");
}

#[tokio::test]
async fn test_schema_is_passed_to_generator() {
    let store = MemoryStore {
        schema: SchemaDescription::new(
            vec!["Person".to_string(), "Company".to_string()],
            vec![RelationshipPattern::new("Person", "WORKS_AT", "Company")],
        ),
        ..Default::default()
    };
    let pipeline = make_pipeline(store, FixedGenerator::replying(ALICE_MERGE));

    pipeline.process_text("Bob works at Acme Corp.").await;

    let calls = pipeline.generator().calls.lock().unwrap();
    assert_eq!(
        calls[0].1,
        "Nodes: Person, Company\nRelationships: Person-WORKS_AT->Company"
    );
}

#[tokio::test]
async fn test_non_merge_statement_is_rejected_without_write() {
    let pipeline = make_pipeline(
        MemoryStore::default(),
        FixedGenerator::replying("CREATE (a:Person {name:'Bob'})"),
    );

    let outcome = pipeline.process_text("Bob is a person.").await;

    assert_eq!(
        outcome.status,
        "Error: Generated Cypher statement does not start with 'MERGE'"
    );
    assert!(outcome.rows.is_none());
    assert!(!outcome.is_success());
    assert!(pipeline.store().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generation_failure_becomes_error_status() {
    let pipeline = make_pipeline(MemoryStore::default(), FixedGenerator::failing("rate limited"));

    let outcome = pipeline.process_text("Alice works at Acme Corp.").await;

    assert!(outcome.status.starts_with("Error: "));
    assert!(outcome.status.contains("rate limited"));
    assert!(outcome.rows.is_none());
    assert!(pipeline.store().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_schema_failure_skips_generation() {
    let store = MemoryStore {
        schema_down: true,
        ..Default::default()
    };
    let pipeline = make_pipeline(store, FixedGenerator::replying(ALICE_MERGE));

    let outcome = pipeline.process_text("Alice works at Acme Corp.").await;

    assert!(outcome.status.starts_with("Error: "));
    assert!(pipeline.generator().calls.lock().unwrap().is_empty());
    assert!(pipeline.store().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_input_does_no_processing() {
    let pipeline = make_pipeline(MemoryStore::default(), FixedGenerator::replying(ALICE_MERGE));

    for text in ["", "   \n\t"] {
        let outcome = pipeline.process_text(text).await;
        assert_eq!(outcome.status, EMPTY_INPUT_STATUS);
        assert!(outcome.rows.is_none());
    }
    assert!(pipeline.generator().calls.lock().unwrap().is_empty());
    assert!(pipeline.store().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_render_runs_after_failed_processing() {
    let store = MemoryStore {
        records: vec![alice_record()],
        ..Default::default()
    };
    let pipeline = make_pipeline(store, FixedGenerator::replying("DROP DATABASE neo4j"));

    let run = pipeline.invoke("Alice works at Acme Corp.").await;

    assert!(run.outcome.status.starts_with("Error: "));
    let html = run.graph.unwrap();
    assert!(html.contains("\"Alice\""));
    assert!(html.contains("\"Acme Corp\""));
    assert!(html.contains("\"WORKS_AT\""));
}

#[tokio::test]
async fn test_invoke_on_empty_graph_renders_empty_document() {
    let pipeline = make_pipeline(MemoryStore::default(), FixedGenerator::replying(ALICE_MERGE));

    let run = pipeline.invoke("").await;

    assert_eq!(run.outcome.status, EMPTY_INPUT_STATUS);
    let html = run.graph.unwrap();
    assert_eq!(html.matches("new vis.DataSet([])").count(), 2);
}

#[tokio::test]
async fn test_schema_text() {
    let store = MemoryStore {
        schema: SchemaDescription::new(
            vec!["Person".to_string()],
            vec![RelationshipPattern::new("Person", "KNOWS", "Person")],
        ),
        ..Default::default()
    };
    let pipeline = make_pipeline(store, FixedGenerator::replying(ALICE_MERGE));

    assert_eq!(
        pipeline.schema_text().await.unwrap(),
        "Nodes: Person\nRelationships: Person-KNOWS->Person"
    );
}
