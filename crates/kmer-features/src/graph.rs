//! Transition graph between (p-1)-length substrings
//!
//! Every observed k-mer induces one directed edge from its prefix to its
//! suffix. Each edge owns an [`EdgeRecord`] whose fields are filled in by
//! successive pipeline stages: raw frequencies, then probability, then
//! log-odds weight, then the normalized feature vector.
//!
//! Edges live in a `BTreeMap` keyed by [`EdgeKey`], so iteration order is the
//! lexicographic `(source, target)` order. Every stage that produces an
//! edge-indexed vector iterates through [`TransitionGraph::sorted_edges`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ndarray::Array1;
use tracing::debug;

/// Directed transition `source -> target`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    /// K-mer without its last symbol
    pub source: String,
    /// K-mer without its first symbol
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Edge induced by a k-mer of at least two symbols
    pub fn from_kmer(kmer: &str) -> Option<Self> {
        let mut chars = kmer.chars();
        chars.next()?;
        let target = chars.as_str();
        let source = kmer.char_indices().last().map(|(i, _)| &kmer[..i])?;
        if target.is_empty() {
            return None;
        }
        Some(Self::new(source, target))
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Per-edge state across the Fisher pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    /// Occurrences of the inducing k-mer, one entry per sample
    pub frequencies: Array1<f64>,
    /// Transition probability from the source node
    pub probability: Option<f64>,
    /// log(1 / probability), zero for zero probability
    pub log_odds: Option<f64>,
    /// Weighted, normalized feature value per sample
    pub normalized: Option<Array1<f64>>,
}

impl EdgeRecord {
    pub fn new(frequencies: Array1<f64>) -> Self {
        Self {
            frequencies,
            probability: None,
            log_odds: None,
            normalized: None,
        }
    }

    /// Frequency summed over all samples
    pub fn total(&self) -> f64 {
        self.frequencies.sum()
    }
}

/// Directed graph of substring transitions for one dataset
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    n_samples: usize,
    nodes: BTreeSet<String>,
    edges: BTreeMap<EdgeKey, EdgeRecord>,
}

impl TransitionGraph {
    /// Empty graph for a dataset of `n_samples` samples
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            nodes: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Add an edge and both of its endpoints, replacing any previous record
    pub fn insert_edge(&mut self, key: EdgeKey, frequencies: Array1<f64>) {
        debug_assert_eq!(frequencies.len(), self.n_samples);
        self.nodes.insert(key.source.clone());
        self.nodes.insert(key.target.clone());
        self.edges.insert(key, EdgeRecord::new(frequencies));
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in lexicographic order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeRecord> {
        self.edges.get(key)
    }

    pub(crate) fn edge_mut(&mut self, key: &EdgeKey) -> Option<&mut EdgeRecord> {
        self.edges.get_mut(key)
    }

    /// Outgoing edges of `node`, sorted by target
    pub fn successors<'a>(
        &'a self,
        node: &'a str,
    ) -> impl Iterator<Item = (&'a EdgeKey, &'a EdgeRecord)> + 'a {
        self.edges
            .range(EdgeKey::new(node, "")..)
            .take_while(move |(key, _)| key.source == node)
    }

    /// Whether `node` has neither incoming nor outgoing edges
    pub fn is_isolated(&self, node: &str) -> bool {
        !self
            .edges
            .keys()
            .any(|key| key.source == node || key.target == node)
    }

    pub fn remove_edge(&mut self, key: &EdgeKey) -> Option<EdgeRecord> {
        self.edges.remove(key)
    }

    /// Drop every node without incident edges, returning how many were removed
    pub fn remove_isolated_nodes(&mut self) -> usize {
        let connected: BTreeSet<&str> = self
            .edges
            .keys()
            .flat_map(|key| [key.source.as_str(), key.target.as_str()])
            .collect();

        let before = self.nodes.len();
        self.nodes.retain(|node| connected.contains(node.as_str()));
        let removed = before - self.nodes.len();

        debug!("Removed {} isolated nodes", removed);
        removed
    }

    /// Edges in canonical `(source, target)` order
    pub fn sorted_edges(&self) -> impl Iterator<Item = (&EdgeKey, &EdgeRecord)> {
        self.edges.iter()
    }

    pub(crate) fn sorted_edges_mut(&mut self) -> impl Iterator<Item = (&EdgeKey, &mut EdgeRecord)> {
        self.edges.iter_mut()
    }

    /// Edge keys in canonical order
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_graph() -> TransitionGraph {
        let mut graph = TransitionGraph::new(2);
        graph.insert_edge(EdgeKey::new("B", "C"), array![1.0, 0.0]);
        graph.insert_edge(EdgeKey::new("A", "C"), array![0.0, 2.0]);
        graph.insert_edge(EdgeKey::new("A", "B"), array![1.0, 1.0]);
        graph
    }

    #[test]
    fn test_edge_from_kmer() {
        assert_eq!(EdgeKey::from_kmer("CAS"), Some(EdgeKey::new("CA", "AS")));
        assert_eq!(EdgeKey::from_kmer("AC"), Some(EdgeKey::new("A", "C")));
        assert_eq!(EdgeKey::from_kmer("A"), None);
        assert_eq!(EdgeKey::from_kmer(""), None);
    }

    #[test]
    fn test_edge_label() {
        assert_eq!(EdgeKey::new("CA", "AS").to_string(), "CA->AS");
    }

    #[test]
    fn test_sorted_edges_order() {
        let graph = sample_graph();
        let keys: Vec<String> = graph.sorted_edges().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["A->B", "A->C", "B->C"]);
    }

    #[test]
    fn test_successors() {
        let graph = sample_graph();
        let targets: Vec<&str> = graph
            .successors("A")
            .map(|(k, _)| k.target.as_str())
            .collect();
        assert_eq!(targets, vec!["B", "C"]);
        assert_eq!(graph.successors("C").count(), 0);
    }

    #[test]
    fn test_successors_do_not_leak_into_longer_prefix() {
        let mut graph = TransitionGraph::new(1);
        graph.insert_edge(EdgeKey::new("A", "A"), array![1.0]);
        graph.insert_edge(EdgeKey::new("AA", "AA"), array![1.0]);
        assert_eq!(graph.successors("A").count(), 1);
    }

    #[test]
    fn test_remove_isolated_nodes() {
        let mut graph = sample_graph();
        graph.remove_edge(&EdgeKey::new("B", "C"));
        graph.remove_edge(&EdgeKey::new("A", "C"));
        assert!(graph.is_isolated("C"));

        assert_eq!(graph.remove_isolated_nodes(), 1);
        assert!(!graph.contains_node("C"));
        assert!(graph.contains_node("B"));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_self_loop_is_not_isolated() {
        let mut graph = TransitionGraph::new(1);
        graph.insert_edge(EdgeKey::new("AA", "AA"), array![3.0]);
        assert_eq!(graph.remove_isolated_nodes(), 0);
        assert_eq!(graph.node_count(), 1);
    }
}
