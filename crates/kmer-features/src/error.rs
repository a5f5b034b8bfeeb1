//! Feature Generation Error Types

use thiserror::Error;

/// Invalid or unsupported configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Feature type is neither `string` nor `fisher`
    #[error("Invalid value for feature type: {0}")]
    InvalidFeatureType(String),

    /// Substring length must be at least 1
    #[error("Invalid substring length p = {0}, must be at least 1")]
    InvalidKmerLength(usize),

    /// Only single-hop transitions are implemented
    #[error("Invalid value n_transition = {0}, n_transition must be 1 at current stage")]
    UnsupportedTransitionDepth(usize),

    /// Probability threshold must be a finite, non-negative number
    #[error("Invalid probability threshold: {0}")]
    InvalidThreshold(f64),

    /// Alphabet contains no symbols
    #[error("Alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// Alphabet lists the same symbol twice
    #[error("Alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(char),

    /// Separator is also a member of the alphabet
    #[error("Separator '{0}' must not be part of the alphabet")]
    SeparatorInAlphabet(char),

    /// |alphabet|^p does not fit in memory addressing
    #[error("Universe of {alphabet}^{p} substrings is too large")]
    UniverseTooLarge { alphabet: usize, p: usize },
}

/// Errors raised while generating features
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Weight vector was computed for a different edge set
    #[error("Log-odds weights do not match graph edges ({weights} weights, {edges} edges)")]
    WeightMismatch { weights: usize, edges: usize },

    /// Feature matrix could not be assembled
    #[error("Feature matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
