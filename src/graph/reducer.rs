//! Arrow reduction
//!
//! Collapses directed candidate arrows into an undirected influence graph.

use super::{CandidateArrow, Edge, InfluenceGraph, PairKey};
use std::collections::HashSet;

/// Reduces candidate arrows into deduplicated edges and cause sets
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphReducer;

impl GraphReducer {
    pub fn new() -> Self {
        Self
    }

    /// Build the influence graph from arrows
    ///
    /// Self-arrows are dropped. Edge order is the first-occurrence order of
    /// the arrows, in whichever direction the pair was first seen; node order
    /// is first appearance in the edge list.
    pub fn reduce<I>(&self, arrows: I) -> InfluenceGraph
    where
        I: IntoIterator<Item = CandidateArrow>,
    {
        let mut graph = InfluenceGraph::default();
        let mut seen_pairs: HashSet<PairKey> = HashSet::new();
        let mut seen_nodes = HashSet::new();
        let mut people = HashSet::new();

        for arrow in arrows {
            graph.stats.arrows += 1;

            if arrow.is_self_loop() {
                graph.stats.self_loops += 1;
                continue;
            }

            let key = PairKey::new(&arrow.source, &arrow.target);

            let causes = graph.causes.entry(key.clone()).or_default();
            if !causes.contains(&arrow.person) {
                causes.push(arrow.person.clone());
            }
            people.insert(arrow.person);

            if seen_pairs.insert(key) {
                for name in [&arrow.source, &arrow.target] {
                    if seen_nodes.insert(name.clone()) {
                        graph.nodes.push(name.clone());
                    }
                }
                graph.edges.push(Edge::new(arrow.source, arrow.target));
            }
        }

        graph.stats.nodes = graph.nodes.len();
        graph.stats.edges = graph.edges.len();
        graph.stats.distinct_people = people.len();

        tracing::debug!(
            arrows = graph.stats.arrows,
            self_loops = graph.stats.self_loops,
            edges = graph.stats.edges,
            nodes = graph.stats.nodes,
            "Arrows reduced"
        );

        graph
    }
}

/// Convenience wrapper around [`GraphReducer::reduce`]
pub fn reduce<I>(arrows: I) -> InfluenceGraph
where
    I: IntoIterator<Item = CandidateArrow>,
{
    GraphReducer::new().reduce(arrows)
}
