use anyhow::{Context, Result};
use graph::{find_cycle, CycleWitness, GraphBuilder, GraphStats, OutputPaths, RenderReport, Renderer};

use crate::source::CommitSource;

/// How a run ended when nothing went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The graph was acyclic and has been written out
    Rendered {
        report: RenderReport,
        stats: GraphStats,
    },
    /// The graph has a cycle; nothing was rendered
    Cyclic(CycleWitness),
}

/// fetch -> build -> verify -> render
pub struct Pipeline<S, R> {
    source: S,
    renderer: R,
    builder: GraphBuilder,
    paths: OutputPaths,
}

impl<S: CommitSource, R: Renderer> Pipeline<S, R> {
    pub fn new(source: S, renderer: R, builder: GraphBuilder, paths: OutputPaths) -> Self {
        Self {
            source,
            renderer,
            builder,
            paths,
        }
    }

    pub fn run(&mut self) -> Result<Outcome> {
        let origin = self.source.describe();
        let records = self.source.fetch()?;
        tracing::info!(%origin, commits = records.len(), "history loaded");

        let graph = self
            .builder
            .build(&records)
            .with_context(|| format!("Commit history from {origin} is malformed"))?;

        if let Some(witness) = find_cycle(&graph) {
            tracing::warn!(node = %witness.node, "commit graph is not acyclic");
            return Ok(Outcome::Cyclic(witness));
        }

        let stats = graph.stats();
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            placeholders = stats.placeholder_nodes,
            "commit graph verified acyclic"
        );

        let report = self
            .renderer
            .render(&graph, &self.paths)
            .context("Failed to render commit graph")?;

        Ok(Outcome::Rendered { report, stats })
    }
}
