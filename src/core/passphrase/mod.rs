//! Passphrase generation.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use zeroize::Zeroizing;

/// Default number of words in a generated passphrase.
pub const DEFAULT_WORDS: usize = 8;

const WORDS: &str = include_str!("words.txt");

/// Source of memorable passphrases.
pub trait Passphrase {
    fn generate(&self) -> Zeroizing<String>;
}

/// Space-separated words drawn uniformly from an embedded list with the
/// OS random number generator.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<&'static str>,
    count: usize,
}

impl WordList {
    pub fn new(count: usize) -> Self {
        Self {
            words: WORDS.lines().map(str::trim).filter(|w| !w.is_empty()).collect(),
            count: count.max(1),
        }
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

impl Passphrase for WordList {
    fn generate(&self) -> Zeroizing<String> {
        let mut rng = OsRng;
        let mut out = Zeroizing::new(String::new());
        for i in 0..self.count {
            if i > 0 {
                out.push(' ');
            }
            if let Some(word) = self.words.choose(&mut rng) {
                out.push_str(word);
            }
        }
        out
    }
}
