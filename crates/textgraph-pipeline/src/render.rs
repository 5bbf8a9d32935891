//! Visualization rendering: a self-contained HTML document driving the
//! vis-network force-directed layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use textgraph_core::error::{Result, TextGraphError};
use textgraph_core::NodeRole;

use crate::config::RenderConfig;
use crate::view::GraphView;

const VIS_NETWORK_JS: &str = "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="__SCRIPT__"></script>
<style>
  body { margin: 0; background-color: __BACKGROUND__; }
  #graph { width: __WIDTH__; height: __HEIGHT__; background-color: __BACKGROUND__; }
</style>
</head>
<body>
<div id="graph"></div>
<script>
  var nodes = new vis.DataSet(__NODES__);
  var edges = new vis.DataSet(__EDGES__);
  var options = {
    nodes: { shape: "dot", font: { color: __FONT_COLOR__ } },
    edges: { arrows: "to", font: { color: __FONT_COLOR__, strokeWidth: 0 } },
    physics: { solver: "barnesHut", stabilization: { iterations: 1000 } }
  };
  new vis.Network(document.getElementById("graph"), { nodes: nodes, edges: edges }, options);
</script>
</body>
</html>
"#;

#[derive(Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
    label: &'a str,
    title: &'a str,
}

/// Serializes a [`GraphView`] into an embeddable HTML document.
pub struct HtmlRenderer {
    config: RenderConfig,
}

impl HtmlRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the view. Layout happens in the browser; only the data is ours.
    pub fn render(&self, view: &GraphView) -> Result<String> {
        let nodes: Vec<VisNode<'_>> = view
            .nodes
            .iter()
            .map(|n| VisNode {
                id: &n.id,
                label: &n.label,
                title: &n.title,
                color: self.role_color(n.role),
            })
            .collect();
        let edges: Vec<VisEdge<'_>> = view
            .edges
            .iter()
            .map(|e| VisEdge {
                from: &e.from,
                to: &e.to,
                label: &e.label,
                title: &e.label,
            })
            .collect();

        let html = TEMPLATE
            .replace("__SCRIPT__", VIS_NETWORK_JS)
            .replace("__BACKGROUND__", &self.config.background)
            .replace("__WIDTH__", &self.config.width)
            .replace("__HEIGHT__", &self.config.height)
            .replace("__FONT_COLOR__", &script_json(&self.config.font_color)?)
            .replace("__NODES__", &script_json(&nodes)?)
            .replace("__EDGES__", &script_json(&edges)?);

        tracing::info!(nodes = nodes.len(), edges = edges.len(), "Graph rendered");
        Ok(html)
    }

    fn role_color(&self, role: NodeRole) -> &str {
        match role {
            NodeRole::Source => self.config.source_color.as_str(),
            NodeRole::Target => self.config.target_color.as_str(),
        }
    }
}

/// JSON for inlining inside a `<script>` element. Double underscores are
/// escaped so graph data can never form a template placeholder.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| TextGraphError::Render(format!("Failed to serialize graph data: {e}")))?;
    Ok(json.replace("</", "<\\/").replace("__", "_\\u005f"))
}

/// Write a rendered document to disk, creating parent directories.
pub fn write_artifact(path: impl AsRef<Path>, html: &str) -> Result<PathBuf> {
    let path = path.as_ref();
    let io_error =
        |e: std::io::Error| TextGraphError::Render(format!("Failed to write {}: {e}", path.display()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, html).map_err(io_error)?;

    tracing::info!(path = %path.display(), "Graph artifact written");
    Ok(path.to_path_buf())
}
