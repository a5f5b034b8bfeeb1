//! Log-odds weighting of transition probabilities

use ndarray::Array1;

use crate::graph::{EdgeKey, TransitionGraph};

/// Log-odds weights aligned to the canonical edge order
#[derive(Debug, Clone, PartialEq)]
pub struct LogOddsWeights {
    /// Edges in canonical order
    pub edges: Vec<EdgeKey>,
    /// `weights[i]` belongs to `edges[i]`
    pub weights: Array1<f64>,
}

impl LogOddsWeights {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// log(1 / probability), with a zero probability treated as probability 1
pub fn log_odds(probability: f64) -> f64 {
    let probability = if probability == 0.0 { 1.0 } else { probability };
    (1.0 / probability).ln()
}

/// Turns retained edge probabilities into information-content weights
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOddsWeighter;

impl LogOddsWeighter {
    /// Compute the weight of every edge, store it on the edge record and
    /// return the weights in canonical edge order.
    ///
    /// An edge without an assigned probability is weighted as probability 0.
    pub fn weigh(&self, graph: &mut TransitionGraph) -> LogOddsWeights {
        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut weights = Vec::with_capacity(graph.edge_count());

        for (key, record) in graph.sorted_edges_mut() {
            let weight = log_odds(record.probability.unwrap_or(0.0));
            record.log_odds = Some(weight);
            edges.push(key.clone());
            weights.push(weight);
        }

        LogOddsWeights {
            edges,
            weights: Array1::from(weights),
        }
    }
}
