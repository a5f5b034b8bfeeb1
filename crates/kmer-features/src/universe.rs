//! K-mer universe enumeration

use std::mem;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::ConfigError;

/// Number of k-mers in the universe, |alphabet|^p.
///
/// Fails when the universe could not be held in one allocation.
pub(crate) fn universe_size(alphabet_len: usize, p: usize) -> Result<usize, ConfigError> {
    u32::try_from(p)
        .ok()
        .and_then(|exp| alphabet_len.checked_pow(exp))
        .filter(|size| {
            size.checked_mul(mem::size_of::<String>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(ConfigError::UniverseTooLarge {
            alphabet: alphabet_len,
            p,
        })
}

/// Every string of length `p` over an alphabet
#[derive(Debug, Clone)]
pub struct KmerUniverse {
    p: usize,
    kmers: Vec<String>,
}

impl KmerUniverse {
    /// Enumerate all |alphabet|^p k-mers.
    ///
    /// Enumeration varies the leftmost position slowest, following the
    /// alphabet's configured order. Column order of string features does not
    /// depend on this; see [`KmerUniverse::sorted`].
    pub fn generate(alphabet: &Alphabet, p: usize) -> Result<Self, ConfigError> {
        if p < 1 {
            return Err(ConfigError::InvalidKmerLength(p));
        }

        let size = universe_size(alphabet.len(), p)?;
        let too_large = ConfigError::UniverseTooLarge {
            alphabet: alphabet.len(),
            p,
        };

        let symbols = alphabet.symbols();
        let mut kmers: Vec<String> = Vec::new();
        kmers.try_reserve_exact(size).map_err(|_| too_large)?;
        let mut digits = vec![0usize; p];

        for _ in 0..size {
            kmers.push(digits.iter().map(|&d| symbols[d]).collect());

            // Odometer increment, rightmost position fastest
            for digit in digits.iter_mut().rev() {
                *digit += 1;
                if *digit < symbols.len() {
                    break;
                }
                *digit = 0;
            }
        }

        debug!("Generated {} substrings of length {}", kmers.len(), p);

        Ok(Self { p, kmers })
    }

    /// Substring length
    pub fn p(&self) -> usize {
        self.p
    }

    /// Number of k-mers (|alphabet|^p)
    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// K-mers in generation order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kmers.iter().map(String::as_str)
    }

    /// K-mers in lexicographic order, the canonical feature column order
    pub fn sorted(&self) -> Vec<String> {
        let mut sorted = self.kmers.clone();
        sorted.sort_unstable();
        sorted
    }
}
