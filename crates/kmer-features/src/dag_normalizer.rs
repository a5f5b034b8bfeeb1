//! Log-odds reweighting and normalization of edge frequencies

use ndarray::{Array2, Axis};
use tracing::debug;

use crate::error::FeatureError;
use crate::graph::TransitionGraph;
use crate::log_odds::LogOddsWeights;
use crate::normalizer::{normalize, NormAxis};

/// Scales every edge's frequency vector by its log-odds weight and
/// L2-normalizes each sample across edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct DagNormalizer;

impl DagNormalizer {
    /// Returns the (n_edges, n_samples) normalized array in canonical edge
    /// order and stores each edge's row on its record.
    ///
    /// With a single sample this normalizes the whole weighted edge vector.
    /// A sample whose weighted vector is zero stays zero.
    pub fn normalize(
        &self,
        graph: &mut TransitionGraph,
        weights: &LogOddsWeights,
    ) -> Result<Array2<f64>, FeatureError> {
        let aligned = weights.len() == graph.edge_count()
            && graph
                .sorted_edges()
                .zip(&weights.edges)
                .all(|((key, _), weighted)| key == weighted);
        if !aligned {
            return Err(FeatureError::WeightMismatch {
                weights: weights.len(),
                edges: graph.edge_count(),
            });
        }

        let n_samples = graph.n_samples();
        let mut flat = Vec::with_capacity(graph.edge_count() * n_samples);
        for (_, record) in graph.sorted_edges() {
            flat.extend(record.frequencies.iter().copied());
        }
        let mut kern = Array2::from_shape_vec((graph.edge_count(), n_samples), flat)?;

        for (mut row, &weight) in kern.axis_iter_mut(Axis(0)).zip(weights.weights.iter()) {
            row *= weight;
        }
        normalize(&mut kern, NormAxis::Columns);

        for ((_, record), row) in graph.sorted_edges_mut().zip(kern.rows()) {
            record.normalized = Some(row.to_owned());
        }

        debug!(
            "Normalized {} edges over {} samples",
            kern.nrows(),
            kern.ncols()
        );

        Ok(kern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeKey;
    use crate::log_odds::LogOddsWeighter;
    use crate::probability::TransitionProbabilityEstimator;
    use crate::transition::TransitionGraphBuilder;
    use ndarray::array;

    fn weighted_graph(dataset: &[&str]) -> (TransitionGraph, LogOddsWeights) {
        let mut graph = TransitionGraphBuilder::new(2, ' ').unwrap().build(dataset);
        TransitionProbabilityEstimator::new(0.0)
            .unwrap()
            .estimate(&mut graph);
        let weights = LogOddsWeighter.weigh(&mut graph);
        (graph, weights)
    }

    #[test]
    fn test_each_sample_unit_norm_across_edges() {
        let (mut graph, weights) = weighted_graph(&["AAC", "AAG"]);
        let kern = DagNormalizer.normalize(&mut graph, &weights).unwrap();

        // Weighted: sample 0 = [ln2, ln4, 0], sample 1 = [ln2, 0, ln4]
        let a = 1.0 / 5f64.sqrt();
        let b = 2.0 / 5f64.sqrt();
        let expected = array![[a, a], [b, 0.0], [0.0, b]];
        assert_eq!(kern.dim(), (3, 2));
        for (got, want) in kern.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }

        let stored = graph
            .edge(&EdgeKey::new("A", "C"))
            .and_then(|r| r.normalized.clone())
            .unwrap();
        assert_eq!(stored, kern.row(1).to_owned());
    }

    #[test]
    fn test_single_sample() {
        let (mut graph, weights) = weighted_graph(&["ACAG"]);
        let kern = DagNormalizer.normalize(&mut graph, &weights).unwrap();

        // A->C and A->G have probability 0.5, C->A has probability 1 (weight 0)
        assert_eq!(kern.dim(), (3, 1));
        let norm: f64 = kern.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert_eq!(kern[[2, 0]], 0.0);
    }

    #[test]
    fn test_zero_weight_vector_stays_zero() {
        // Every transition is certain, so every weight is zero
        let (mut graph, weights) = weighted_graph(&["ACGT"]);
        let kern = DagNormalizer.normalize(&mut graph, &weights).unwrap();
        assert!(kern.iter().all(|&v| v == 0.0));
        assert!(kern.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rejects_stale_weights() {
        let (mut graph, weights) = weighted_graph(&["AAC", "AAG"]);
        graph.remove_edge(&EdgeKey::new("A", "G"));
        let err = DagNormalizer.normalize(&mut graph, &weights).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::WeightMismatch { weights: 3, edges: 2 }
        ));
    }
}
