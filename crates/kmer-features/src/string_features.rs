//! Substring occurrence ("string") features

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use tracing::{debug, info};

use crate::universe::KmerUniverse;

/// Counts, per sample, the occurrences of every universe k-mer.
///
/// Columns follow the lexicographic order of the k-mer strings, not the
/// universe's generation order.
pub struct StringFeatureExtractor {
    /// Substring length
    p: usize,
    /// Sorted k-mers, one per column
    columns: Vec<String>,
    /// K-mer to column index
    index: HashMap<String, usize>,
    /// Report progress at info level
    verbose: bool,
}

impl StringFeatureExtractor {
    /// Create an extractor over the given universe
    pub fn new(universe: &KmerUniverse) -> Self {
        let columns = universe.sorted();
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, kmer)| (kmer.clone(), i))
            .collect();

        Self {
            p: universe.p(),
            columns,
            index,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Column labels of the emitted matrix
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw counts for one sample.
    ///
    /// Windows holding the separator or any symbol outside the alphabet are
    /// not universe members and are skipped.
    pub fn count(&self, sample: &str) -> Array1<f64> {
        let mut counts = Array1::zeros(self.columns.len());
        let symbols: Vec<char> = sample.chars().collect();
        let mut window_buf = String::with_capacity(self.p);

        for window in symbols.windows(self.p) {
            window_buf.clear();
            window_buf.extend(window);
            if let Some(&col) = self.index.get(window_buf.as_str()) {
                counts[col] += 1.0;
            }
        }

        counts
    }

    /// Raw count matrix of shape (n_samples, |universe|)
    pub fn extract<S: AsRef<str>>(&self, dataset: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((dataset.len(), self.columns.len()));

        for (i, sample) in dataset.iter().enumerate() {
            if self.verbose {
                info!("Processing {}-th data item", i);
            } else {
                debug!("Processing {}-th data item", i);
            }
            matrix.row_mut(i).assign(&self.count(sample.as_ref()));
        }

        matrix
    }
}
