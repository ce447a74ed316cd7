//! Sentiment scoring for free-text feedback.
//!
//! The pipeline consumes scoring through the [`SentimentAnalyzer`] seam;
//! the bundled [`LexiconAnalyzer`] is a valence-lexicon scorer whose
//! comparative score is mapped into the system-wide normalized [1, 5]
//! range and labeled with the fixed positive/neutral/negative cutoffs.

pub mod lexicon;

use sauti_types::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Result of scoring one comment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Raw summed valence over matched tokens.
    pub raw: i32,
    /// Valence sum divided by token count.
    pub comparative: f64,
    /// Comparative mapped into [1, 5], rounded to 2 decimals.
    pub normalized: f64,
    pub label: SentimentLabel,
}

/// The scoring capability the processing pipeline depends on.
///
/// Implementations must be pure with respect to the input text; the same
/// comment always yields the same score.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> SentimentScore;
}

/// Valence-lexicon analyzer.
///
/// Tokenizes on non-alphabetic boundaries, sums per-word valences from the
/// embedded lexicon, and normalizes: comparative clamped to [-3, 3], then
/// mapped linearly onto [1, 5].
#[derive(Debug, Default, Clone)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> SentimentScore {
        let mut raw = 0i32;
        let mut tokens = 0usize;

        for word in text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
        {
            tokens += 1;
            raw += lexicon::valence(&word.to_lowercase());
        }

        let comparative = if tokens == 0 {
            0.0
        } else {
            raw as f64 / tokens as f64
        };

        let clamped = comparative.clamp(-3.0, 3.0);
        let mapped = (clamped + 3.0) / 6.0 * 4.0 + 1.0;
        let normalized = (mapped * 100.0).round() / 100.0;

        SentimentScore {
            raw,
            comparative,
            normalized,
            label: SentimentLabel::from_score(normalized),
        }
    }
}
