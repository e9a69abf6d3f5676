//! Graphviz (DOT) description of an influence graph

use crate::color::HexColor;
use crate::graph::{GroupName, InfluenceGraph};
use crate::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Joins the people listed on an edge label
pub const LABEL_DELIMITER: &str = ", ";

const INDENT: &str = "    ";

/// Fill color of each group, by name
pub type ColorMap = HashMap<GroupName, HexColor>;

/// Renders an influence graph as an undirected DOT graph
#[derive(Debug, Clone, Copy)]
pub struct DotExporter {
    show_labels: bool,
}

impl Default for DotExporter {
    fn default() -> Self {
        Self { show_labels: true }
    }
}

impl DotExporter {
    pub fn new(show_labels: bool) -> Self {
        Self { show_labels }
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// DOT text for `graph`
    ///
    /// Only nodes in use are declared, each filled with its group color and
    /// a readable font color. Groups missing from `colors` get a plain box.
    pub fn export(&self, graph: &InfluenceGraph, colors: &ColorMap) -> String {
        let mut out = String::from("graph G {\n");
        out.push_str(&format!("{INDENT}overlap=false;\n"));
        out.push_str(&format!("{INDENT}sep=\"+10\";\n"));

        out.push_str(&format!("{INDENT}{{\n"));
        for name in &graph.nodes {
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push_str(&node_declaration(name, colors.get(name)));
            out.push('\n');
        }
        out.push_str(&format!("{INDENT}}}\n"));

        for edge in &graph.edges {
            out.push_str(&format!(
                "{INDENT}\"{}\" -- \"{}\"",
                escape(edge.a.as_str()),
                escape(edge.b.as_str())
            ));
            if self.show_labels {
                let label = graph
                    .causes_of(edge)
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(LABEL_DELIMITER);
                out.push_str(&format!(" [label=\"{}\"]", escape(&label)));
            }
            out.push_str(";\n");
        }

        out.push_str("}\n");
        out
    }

    /// Write the DOT text for `graph` to `path`
    pub fn write(&self, graph: &InfluenceGraph, colors: &ColorMap, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.export(graph, colors))?;
        tracing::info!(
            path = %path.display(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Graph description written"
        );
        Ok(())
    }
}

fn node_declaration(name: &GroupName, color: Option<&HexColor>) -> String {
    match color {
        Some(color) => format!(
            "\"{}\" [shape=box style=filled fillcolor=\"{}\" fontcolor=\"{}\"];",
            escape(name.as_str()),
            color,
            color.readable_text_color()
        ),
        None => {
            tracing::debug!(group = %name, "No color known for group");
            format!("\"{}\" [shape=box];", escape(name.as_str()))
        }
    }
}

/// Escape a string for use inside a DOT double-quoted string
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}
