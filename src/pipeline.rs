//! Graph generation pipeline
//!
//! query → extract → reduce → export → render, run strictly in sequence.

use crate::api::{fetch_memberships, MembershipsData, QueryClient, QueryTransport};
use crate::config::{FilterConfig, OutputConfig};
use crate::export::{ColorMap, DotExporter};
use crate::graph::{GraphReducer, InfluenceGraph, MembershipExtractor};
use crate::Result;
use graphviz::{Graphviz, Layout, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A reduced graph together with the colors of its groups
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    pub graph: InfluenceGraph,
    pub colors: ColorMap,
}

impl GraphBuild {
    /// Extract and reduce the arrows of a memberships payload
    pub fn from_memberships(data: &MembershipsData, filter: &FilterConfig) -> Self {
        let extractor = MembershipExtractor::from_config(filter);
        let graph = GraphReducer::new().reduce(extractor.extract(&data.groups));

        info!(
            groups = data.groups.len(),
            nodes = graph.stats.nodes,
            edges = graph.stats.edges,
            people = graph.stats.distinct_people,
            "Influence graph built"
        );

        Self {
            graph,
            colors: data.colors(),
        }
    }

    /// Fetch the memberships of the configured group types and build the graph
    pub async fn fetch<T: QueryTransport>(
        client: &mut QueryClient<T>,
        filter: &FilterConfig,
    ) -> Result<Self> {
        let data = fetch_memberships(client, &filter.group_types).await?;
        Ok(Self::from_memberships(&data, filter))
    }

    /// DOT text of the graph
    pub fn describe(&self, output: &OutputConfig) -> String {
        DotExporter::new(output.show_labels).export(&self.graph, &self.colors)
    }

    /// Write the DOT text to the configured graph path
    pub fn write<'a>(&self, output: &'a OutputConfig) -> Result<&'a Path> {
        DotExporter::new(output.show_labels).write(&self.graph, &self.colors, &output.graph_path)?;
        Ok(output.graph_path.as_path())
    }
}

/// Parse the configured image formats
pub fn output_formats(output: &OutputConfig) -> Result<Vec<OutputFormat>> {
    Ok(output
        .formats
        .iter()
        .map(|f| f.parse::<OutputFormat>())
        .collect::<graphviz::Result<Vec<_>>>()?)
}

/// Render the graph description into every configured format
///
/// Each artifact lands next to the description. Returns the artifact paths
/// in format order.
pub fn render(output: &OutputConfig) -> Result<Vec<PathBuf>> {
    let layout: Layout = output.layout.parse()?;
    let formats = output_formats(output)?;

    let gv = Graphviz::new()?.with_layout(layout).with_verbose(true);
    if let Ok(version) = gv.version() {
        debug!(%version, "Graphviz found");
    }

    let mut artifacts = Vec::with_capacity(formats.len());
    for format in formats {
        let artifact = gv.render_beside(&output.graph_path, format)?;
        info!(path = %artifact.display(), layout = %layout, "Rendered");
        artifacts.push(artifact);
    }
    Ok(artifacts)
}

/// Open a rendered artifact with the system viewer
pub fn open_artifact(path: &Path) {
    if let Err(e) = open::that(path) {
        warn!(path = %path.display(), error = %e, "Could not open artifact");
    }
}
