//! Feature generation entry point

use ndarray::Array2;
use tracing::{debug, info};

use crate::alphabet::Alphabet;
use crate::config::{FeatureConfig, FeatureType};
use crate::dag_normalizer::DagNormalizer;
use crate::error::{ConfigError, FeatureError};
use crate::graph::TransitionGraph;
use crate::log_odds::{LogOddsWeighter, LogOddsWeights};
use crate::normalizer::normalize_rows;
use crate::probability::TransitionProbabilityEstimator;
use crate::string_features::StringFeatureExtractor;
use crate::transition::TransitionGraphBuilder;
use crate::universe::KmerUniverse;

/// Turns a dataset of pooled sequences into a (n_samples, n_features) matrix.
///
/// Row `i` of every output belongs to sample `i` of the input. Columns are
/// sorted k-mers in string mode and sorted `(source, target)` transitions in
/// Fisher mode; [`FeatureGenerator::feature_names`] labels them.
///
/// ```
/// use kmer_features::{FeatureConfig, FeatureGenerator};
///
/// let config = FeatureConfig::string(2).with_alphabet("AC");
/// let mut generator = FeatureGenerator::new(config).unwrap();
/// let features = generator.process(&["AAC"]).unwrap();
///
/// assert_eq!(features.dim(), (1, 4));
/// assert_eq!(generator.feature_names(), &["AA", "AC", "CA", "CC"]);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureGenerator {
    config: FeatureConfig,
    alphabet: Alphabet,
    /// Column labels of the last output
    feature_names: Vec<String>,
    /// Weights of the last Fisher run
    log_odds: Option<LogOddsWeights>,
}

impl FeatureGenerator {
    /// Validate `config` and create a generator
    pub fn new(config: FeatureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let alphabet = Alphabet::new(&config.alphabet)?;

        debug!(
            "Feature generator: type={}, p={}, |alphabet|={}, threshold={}",
            config.feature_type,
            config.p,
            alphabet.len(),
            config.proba_threshold
        );

        Ok(Self {
            config,
            alphabet,
            feature_names: Vec::new(),
            log_odds: None,
        })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Column labels of the most recent [`FeatureGenerator::process`] output
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Log-odds weights of the most recent Fisher run
    pub fn log_odds(&self) -> Option<&LogOddsWeights> {
        self.log_odds.as_ref()
    }

    /// Generate the feature matrix for `dataset`
    pub fn process<S: AsRef<str>>(&mut self, dataset: &[S]) -> Result<Array2<f64>, FeatureError> {
        self.feature_names.clear();
        self.log_odds = None;

        if self.config.verbose {
            info!(
                "Generating {} features for {} samples",
                self.config.feature_type,
                dataset.len()
            );
        }

        match self.config.feature_type {
            FeatureType::String => self.process_string(dataset),
            FeatureType::Fisher => {
                if self.config.n_transition != 1 {
                    return Err(ConfigError::UnsupportedTransitionDepth(self.config.n_transition).into());
                }
                self.process_fisher(dataset)
            }
        }
    }

    fn process_string<S: AsRef<str>>(&mut self, dataset: &[S]) -> Result<Array2<f64>, FeatureError> {
        let universe = KmerUniverse::generate(&self.alphabet, self.config.p)?;
        let extractor = StringFeatureExtractor::new(&universe).with_verbose(self.config.verbose);

        let mut kern = extractor.extract(dataset);
        normalize_rows(&mut kern);

        self.feature_names = extractor.columns().to_vec();
        Ok(kern)
    }

    fn process_fisher<S: AsRef<str>>(&mut self, dataset: &[S]) -> Result<Array2<f64>, FeatureError> {
        let mut graph = TransitionGraphBuilder::new(self.config.p, self.config.separator)?
            .with_verbose(self.config.verbose)
            .build(dataset);

        let estimator = TransitionProbabilityEstimator::new(self.config.proba_threshold)?;
        let pruned = estimator.estimate(&mut graph);
        debug!(
            "Pruned {} edges and {} isolated nodes",
            pruned.pruned_edges, pruned.removed_nodes
        );
        let weights = LogOddsWeighter.weigh(&mut graph);
        DagNormalizer.normalize(&mut graph, &weights)?;

        let kern = extract_normalized(&graph)?;

        self.feature_names = weights.edges.iter().map(ToString::to_string).collect();
        self.log_odds = Some(weights);
        Ok(kern)
    }
}

/// Normalized edge vectors in canonical edge order, as (n_samples, n_edges)
fn extract_normalized(graph: &TransitionGraph) -> Result<Array2<f64>, FeatureError> {
    let n_samples = graph.n_samples();
    let mut flat = Vec::with_capacity(graph.edge_count() * n_samples);
    for (_, record) in graph.sorted_edges() {
        flat.extend(record.normalized.iter().flatten().copied());
    }

    let by_edge = Array2::from_shape_vec((graph.edge_count(), n_samples), flat)?;
    Ok(by_edge.t().as_standard_layout().into_owned())
}
