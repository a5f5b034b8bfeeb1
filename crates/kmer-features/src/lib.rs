//! K-mer Feature Generation
//!
//! Converts pools of variable-length sequences into fixed-shape feature
//! matrices for a downstream classifier:
//! - String features: L2-normalized occurrence counts of every k-mer
//! - Fisher features: k-mer transition counts weighted by log(1/probability)
//!   of the transition, estimated on a prefix -> suffix transition graph

mod alphabet;
mod config;
mod dag_normalizer;
mod error;
mod generator;
mod graph;
mod log_odds;
mod normalizer;
mod probability;
mod string_features;
mod transition;
mod universe;

pub use alphabet::{Alphabet, AMINO_ACIDS};
pub use config::{FeatureConfig, FeatureType, DEFAULT_P, DEFAULT_SEPARATOR};
pub use dag_normalizer::DagNormalizer;
pub use error::{ConfigError, FeatureError};
pub use generator::FeatureGenerator;
pub use graph::{EdgeKey, EdgeRecord, TransitionGraph};
pub use log_odds::{log_odds, LogOddsWeighter, LogOddsWeights};
pub use normalizer::{l2_norm, normalize, normalize_rows, normalize_vector, NormAxis};
pub use probability::{PruneSummary, TransitionProbabilityEstimator};
pub use string_features::StringFeatureExtractor;
pub use transition::TransitionGraphBuilder;
pub use universe::KmerUniverse;
