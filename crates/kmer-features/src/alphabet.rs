//! Symbol Alphabet

use crate::error::ConfigError;

/// The 20 single-letter amino acid codes
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Ordered set of symbols that k-mers are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `symbols`, keeping their order
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        let mut seen = Vec::new();
        for symbol in symbols.chars() {
            if seen.contains(&symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol));
            }
            seen.push(symbol);
        }

        if seen.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        Ok(Self { symbols: seen })
    }

    /// Symbols in configured order
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a validated alphabet
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `symbol` belongs to the alphabet
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: AMINO_ACIDS.chars().collect(),
        }
    }
}
