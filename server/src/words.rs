//! Word catalog and uniform random selection for round words.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const CATALOG: &str = include_str!("../words.txt");

/// Owns the immutable word catalog and the generator that draws from it.
///
/// The generator is seeded exactly once at construction, either from entropy
/// or from an operator-supplied seed for reproducible games. Repeats across
/// rounds are allowed.
pub struct WordSource {
    words: Vec<&'static str>,
    rng: StdRng,
}

impl WordSource {
    /// Builds the source over the embedded catalog.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_catalog(CATALOG, seed)
    }

    /// Builds the source over an arbitrary newline-separated catalog. The
    /// catalog must contain at least one word.
    pub fn from_catalog(catalog: &'static str, seed: Option<u64>) -> Self {
        let words: Vec<&'static str> = catalog
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(!words.is_empty(), "word catalog is empty");

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { words, rng }
    }

    /// Draws one word uniformly at random, independently each call.
    pub fn pick(&mut self) -> &'static str {
        // Non-empty by construction, so choose never returns None.
        self.words
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(self.words[0])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
