//! CLI entry point for the textgraph pipeline.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use textgraph_graph::GraphClient;

use textgraph_pipeline::render::write_artifact;
use textgraph_pipeline::{
    AppConfig, HtmlRenderer, LlmStatementGenerator, OpenAiChatModel, Pipeline, ProcessOutcome,
};

#[derive(Parser)]
#[command(name = "textgraph")]
#[command(about = "Turn free-form text into Neo4j knowledge-graph updates")]
struct Cli {
    /// Config file prefix (default: textgraph).
    #[arg(short, long, default_value = "textgraph", global = true)]
    config: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract graph updates from text, execute them, and redraw the graph.
    Process {
        /// Text to process. Read from --file or stdin when omitted.
        text: Option<String>,

        /// Read the text from a file.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Where to write the visualization (overrides render.output_path).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the current graph schema as it is shown to the model.
    Schema,
    /// Redraw the stored graph without processing any text.
    Render {
        /// Where to write the visualization (overrides render.output_path).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = AppConfig::load(&cli.config)?;
    let output_default = PathBuf::from(&config.render.output_path);

    let store = GraphClient::connect(&config.neo4j).await?;
    let model = OpenAiChatModel::new(&config.llm)?;
    let pipeline = Pipeline::new(
        store,
        LlmStatementGenerator::new(model),
        HtmlRenderer::new(config.render),
    );

    match cli.command {
        Command::Process { text, file, output } => {
            let text = read_input(text, file)?;
            let run = pipeline.invoke(&text).await;
            print_outcome(&run.outcome)?;
            emit_graph(run.graph, output.unwrap_or(output_default));
        }
        Command::Schema => match pipeline.schema_text().await {
            Ok(schema) => println!("{schema}"),
            Err(e) => println!("{}", e.status_message()),
        },
        Command::Render { output } => {
            let graph = pipeline.render_graph().await;
            emit_graph(graph, output.unwrap_or(output_default));
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn print_outcome(outcome: &ProcessOutcome) -> anyhow::Result<()> {
    println!("{}", outcome.status);
    if let Some(rows) = outcome.rows.as_ref().filter(|rows| !rows.is_empty()) {
        println!("{}", serde_json::to_string_pretty(rows)?);
    }
    Ok(())
}

fn emit_graph(graph: textgraph_core::error::Result<String>, path: PathBuf) {
    match graph.and_then(|html| write_artifact(&path, &html)) {
        Ok(path) => println!("Graph written to {}", path.display()),
        Err(e) => println!("Error creating graph visualization: {e}"),
    }
}
