//! Feature generation configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, AMINO_ACIDS};
use crate::error::ConfigError;
use crate::universe::universe_size;

/// Default substring length
pub const DEFAULT_P: usize = 3;

/// Default separator between pooled sequences of one sample
pub const DEFAULT_SEPARATOR: char = ' ';

/// Feature family produced by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FeatureType {
    /// Raw substring occurrence counts, L2-normalized per sample
    #[default]
    String,
    /// Transition counts weighted by log(1/transition probability)
    Fisher,
}

impl FeatureType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::String => "string",
            FeatureType::Fisher => "fisher",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FeatureType::String),
            "fisher" => Ok(FeatureType::Fisher),
            other => Err(ConfigError::InvalidFeatureType(other.to_string())),
        }
    }
}

impl TryFrom<String> for FeatureType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FeatureType> for String {
    fn from(value: FeatureType) -> Self {
        value.as_str().to_string()
    }
}

/// Feature generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Symbols k-mers are drawn from, in order
    pub alphabet: String,

    /// Substring (k-mer) length
    pub p: usize,

    /// Which feature family to produce
    pub feature_type: FeatureType,

    /// Number of transitions per edge (only 1 is implemented)
    pub n_transition: usize,

    /// Transitions with probability strictly below this are pruned
    pub proba_threshold: f64,

    /// Separator between pooled sequences inside a sample
    pub separator: char,

    /// Report per-sample progress at info level
    pub verbose: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            alphabet: AMINO_ACIDS.to_string(),
            p: DEFAULT_P,
            feature_type: FeatureType::String,
            n_transition: 1,
            proba_threshold: 0.0,
            separator: DEFAULT_SEPARATOR,
            verbose: false,
        }
    }
}

impl FeatureConfig {
    /// String features of length `p` over the default alphabet
    pub fn string(p: usize) -> Self {
        Self {
            p,
            ..Default::default()
        }
    }

    /// Fisher features of length `p` over the default alphabet
    pub fn fisher(p: usize) -> Self {
        Self {
            p,
            feature_type: FeatureType::Fisher,
            ..Default::default()
        }
    }

    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    pub fn with_threshold(mut self, proba_threshold: f64) -> Self {
        self.proba_threshold = proba_threshold;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_transitions(mut self, n_transition: usize) -> Self {
        self.n_transition = n_transition;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check every construction-time constraint.
    ///
    /// `n_transition` is checked when a Fisher run starts, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A transition needs at least two symbols
        let min_p = match self.feature_type {
            FeatureType::String => 1,
            FeatureType::Fisher => 2,
        };
        if self.p < min_p {
            return Err(ConfigError::InvalidKmerLength(self.p));
        }

        if !self.proba_threshold.is_finite() || self.proba_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.proba_threshold));
        }

        let alphabet = Alphabet::new(&self.alphabet)?;
        if alphabet.contains(self.separator) {
            return Err(ConfigError::SeparatorInAlphabet(self.separator));
        }

        if self.feature_type == FeatureType::String {
            universe_size(alphabet.len(), self.p)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeatureConfig::default();
        assert_eq!(config.alphabet, "ACDEFGHIKLMNPQRSTVWY");
        assert_eq!(config.p, 3);
        assert_eq!(config.feature_type, FeatureType::String);
        assert_eq!(config.n_transition, 1);
        assert_eq!(config.proba_threshold, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_feature_type_parsing() {
        assert_eq!("string".parse::<FeatureType>(), Ok(FeatureType::String));
        assert_eq!("fisher".parse::<FeatureType>(), Ok(FeatureType::Fisher));
        assert_eq!(
            "spectrum".parse::<FeatureType>(),
            Err(ConfigError::InvalidFeatureType("spectrum".into()))
        );
    }

    #[test]
    fn test_invalid_feature_type_from_serde() {
        let err = serde_json::from_str::<FeatureConfig>(r#"{"feature_type": "kernel"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid value for feature type: kernel"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FeatureConfig =
            serde_json::from_str(r#"{"p": 2, "feature_type": "fisher"}"#).unwrap();
        assert_eq!(config.p, 2);
        assert_eq!(config.feature_type, FeatureType::Fisher);
        assert_eq!(config.separator, ' ');
    }

    #[test]
    fn test_rejects_zero_p() {
        assert_eq!(
            FeatureConfig::string(0).validate(),
            Err(ConfigError::InvalidKmerLength(0))
        );
    }

    #[test]
    fn test_fisher_needs_two_symbols() {
        assert!(FeatureConfig::string(1).validate().is_ok());
        assert_eq!(
            FeatureConfig::fisher(1).validate(),
            Err(ConfigError::InvalidKmerLength(1))
        );
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let config = FeatureConfig::fisher(2).with_threshold(-0.1);
        assert_eq!(config.validate(), Err(ConfigError::InvalidThreshold(-0.1)));
        assert!(FeatureConfig::fisher(2)
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_separator_in_alphabet() {
        let config = FeatureConfig::string(2).with_alphabet("AC_").with_separator('_');
        assert_eq!(config.validate(), Err(ConfigError::SeparatorInAlphabet('_')));
    }

    #[test]
    fn test_rejects_huge_universe() {
        let config = FeatureConfig::string(40);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UniverseTooLarge { alphabet: 20, p: 40 })
        ));
        // Fisher features never enumerate the universe
        assert!(FeatureConfig::fisher(40).validate().is_ok());
    }

    #[test]
    fn test_rejects_unallocatable_universe() {
        // 20^14 fits in a u64 but its k-mer table does not fit in memory
        assert_eq!(
            FeatureConfig::string(14).validate(),
            Err(ConfigError::UniverseTooLarge { alphabet: 20, p: 14 })
        );
        assert!(FeatureConfig::string(4).validate().is_ok());
    }

    #[test]
    fn test_transition_depth_not_checked_at_construction() {
        assert!(FeatureConfig::fisher(3).with_transitions(2).validate().is_ok());
    }
}
