//! Candidate ranking by partial input.
//!
//! Scoring itself is delegated to a [`FuzzyScorer`]; this module only decides
//! when to call it and maps its answer back onto the candidates.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Fuzzy matching capability.
pub trait FuzzyScorer: Send + Sync {
    /// Indices into `candidates` of every candidate with a positive score
    /// against `pattern`, best first. Equal scores keep candidate order.
    fn rank(&self, pattern: &str, candidates: &[&str]) -> Vec<usize>;
}

/// [`FuzzyScorer`] backed by nucleo, matching case-insensitively.
#[derive(Debug, Clone)]
pub struct NucleoScorer {
    config: Config,
}

impl NucleoScorer {
    pub fn new() -> Self {
        Self {
            config: Config::DEFAULT,
        }
    }
}

impl Default for NucleoScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyScorer for NucleoScorer {
    fn rank(&self, pattern: &str, candidates: &[&str]) -> Vec<usize> {
        let pattern = Pattern::new(
            pattern,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut matcher = Matcher::new(self.config.clone());
        let mut buffer = Vec::<char>::new();

        let mut scored: Vec<(usize, u32)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, candidate)| {
                buffer.clear();
                let haystack = Utf32Str::new(candidate, &mut buffer);
                pattern
                    .score(haystack, &mut matcher)
                    .filter(|&score| score > 0)
                    .map(|score| (idx, score))
            })
            .collect();

        // Stable: ties stay in candidate order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }
}

/// Rank `candidates` by `prefix`.
///
/// An empty prefix returns the candidates untouched. Otherwise only the
/// candidates the scorer accepts are returned, in the scorer's order.
pub fn rank<T, F>(candidates: Vec<T>, prefix: &str, key: F, scorer: &dyn FuzzyScorer) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if prefix.is_empty() {
        return candidates;
    }

    let order = {
        let names: Vec<&str> = candidates.iter().map(|c| key(c)).collect();
        scorer.rank(prefix, &names)
    };

    let mut slots: Vec<Option<T>> = candidates.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots.get_mut(idx).and_then(Option::take))
        .collect()
}
