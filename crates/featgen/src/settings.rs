//! Layered configuration loading
//!
//! Precedence, lowest first: built-in defaults, config file, `FEATGEN_*`
//! environment variables, command-line overrides.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use kmer_features::FeatureConfig;

/// Environment variable prefix, e.g. `FEATGEN_P=4`
pub const ENV_PREFIX: &str = "FEATGEN";

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub alphabet: Option<String>,
    pub p: Option<usize>,
    pub feature_type: Option<String>,
    pub n_transition: Option<usize>,
    pub proba_threshold: Option<f64>,
    pub separator: Option<char>,
}

/// Merge every configuration layer into a [`FeatureConfig`]
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<FeatureConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .set_override_option("alphabet", overrides.alphabet.clone())?
        .set_override_option("p", overrides.p.map(|p| p as i64))?
        .set_override_option("feature_type", overrides.feature_type.clone())?
        .set_override_option("n_transition", overrides.n_transition.map(|n| n as i64))?
        .set_override_option("proba_threshold", overrides.proba_threshold)?
        .set_override_option("separator", overrides.separator.map(String::from))?
        .build()?
        .try_deserialize()
}
