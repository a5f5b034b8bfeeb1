//! Transition graph construction from per-sample k-mer frequencies

use std::collections::BTreeMap;

use ndarray::Array1;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::graph::{EdgeKey, TransitionGraph};

/// Scans samples for overlapping k-mers and turns them into transition edges
#[derive(Debug, Clone)]
pub struct TransitionGraphBuilder {
    /// K-mer length, at least 2 so that every k-mer spans one transition
    p: usize,
    /// Symbol that k-mers may not contain
    separator: char,
    /// Report progress at info level
    verbose: bool,
}

impl TransitionGraphBuilder {
    pub fn new(p: usize, separator: char) -> Result<Self, ConfigError> {
        if p < 2 {
            return Err(ConfigError::InvalidKmerLength(p));
        }
        Ok(Self {
            p,
            separator,
            verbose: false,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Per-sample frequency vector of every observed k-mer.
    ///
    /// A vector is allocated the first time its k-mer is seen; windows that
    /// contain the separator are never counted.
    pub fn count_kmers<S: AsRef<str>>(&self, dataset: &[S]) -> BTreeMap<String, Array1<f64>> {
        let n_samples = dataset.len();
        let mut counts: BTreeMap<String, Array1<f64>> = BTreeMap::new();
        let mut window_buf = String::with_capacity(self.p);

        for (c, sample) in dataset.iter().enumerate() {
            if self.verbose {
                info!("Processing {}-th data item", c);
            } else {
                debug!("Processing {}-th data item", c);
            }

            let symbols: Vec<char> = sample.as_ref().chars().collect();
            for window in symbols.windows(self.p) {
                if window.contains(&self.separator) {
                    continue;
                }
                window_buf.clear();
                window_buf.extend(window);

                match counts.get_mut(window_buf.as_str()) {
                    Some(freq) => freq[c] += 1.0,
                    None => {
                        let mut freq = Array1::zeros(n_samples);
                        freq[c] = 1.0;
                        counts.insert(window_buf.clone(), freq);
                    }
                }
            }
        }

        counts
    }

    /// Build the transition graph: one edge `prefix -> suffix` per observed k-mer
    pub fn build<S: AsRef<str>>(&self, dataset: &[S]) -> TransitionGraph {
        let counts = self.count_kmers(dataset);
        let mut graph = TransitionGraph::new(dataset.len());

        for (kmer, frequencies) in counts {
            if let Some(key) = EdgeKey::from_kmer(&kmer) {
                graph.insert_edge(key, frequencies);
            }
        }

        debug!(
            "Built transition graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }
}
