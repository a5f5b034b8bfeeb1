//! Transition probability estimation and pruning

use tracing::debug;

use crate::error::ConfigError;
use crate::graph::{EdgeKey, TransitionGraph};

/// Outcome of a probability pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneSummary {
    /// Edges removed for falling below the threshold
    pub pruned_edges: usize,
    /// Nodes removed for having no incident edge left
    pub removed_nodes: usize,
}

/// Assigns each edge the probability of leaving its source node through it
#[derive(Debug, Clone)]
pub struct TransitionProbabilityEstimator {
    proba_threshold: f64,
}

impl TransitionProbabilityEstimator {
    pub fn new(proba_threshold: f64) -> Result<Self, ConfigError> {
        if !proba_threshold.is_finite() || proba_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(proba_threshold));
        }
        Ok(Self { proba_threshold })
    }

    /// Set `probability` on every edge, prune edges strictly below the
    /// threshold, then drop nodes left without incident edges.
    ///
    /// For a node whose outgoing frequency sums to zero every outgoing edge
    /// gets probability 0.
    pub fn estimate(&self, graph: &mut TransitionGraph) -> PruneSummary {
        let nodes: Vec<String> = graph.nodes().map(str::to_owned).collect();
        let mut pruned_edges = 0;

        for node in &nodes {
            // Snapshot of the outgoing edges, taken before any removal
            let outgoing: Vec<(EdgeKey, f64)> = graph
                .successors(node)
                .map(|(key, record)| (key.clone(), record.total()))
                .collect();
            let node_total: f64 = outgoing.iter().map(|(_, total)| total).sum();

            let mut to_remove = Vec::new();
            for (key, total) in outgoing {
                let probability = if node_total > 0.0 {
                    total / node_total
                } else {
                    0.0
                };

                if let Some(record) = graph.edge_mut(&key) {
                    record.probability = Some(probability);
                }
                if probability < self.proba_threshold {
                    to_remove.push(key);
                }
            }

            for key in &to_remove {
                graph.remove_edge(key);
            }
            pruned_edges += to_remove.len();
        }

        let removed_nodes = graph.remove_isolated_nodes();

        debug!(
            "Pruned {} edges below probability {}, {} edges retained",
            pruned_edges,
            self.proba_threshold,
            graph.edge_count()
        );

        PruneSummary {
            pruned_edges,
            removed_nodes,
        }
    }
}
