//! "Did you mean" suggestions for mistyped contact and group names.
//!
//! CHANGELOG:
//! - 10/18/2026 - Reduced to suggestion lookup over directory names

use strsim::{jaro_winkler, normalized_levenshtein};

/// Minimum similarity (0.0 - 1.0) before a name is offered as a suggestion.
pub const SUGGEST_THRESHOLD: f64 = 0.8;

/// Best-of similarity between two names, case-insensitive.
///
/// Takes the max of Jaro-Winkler (good for typos near the start),
/// normalized Levenshtein, and Jaro-Winkler over word-sorted tokens
/// (handles "Smith Alice" vs "Alice Smith").
pub fn similarity(query: &str, target: &str) -> f64 {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    [
        jaro_winkler(&query, &target),
        normalized_levenshtein(&query, &target),
        jaro_winkler(&sorted_tokens(&query), &sorted_tokens(&target)),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Closest candidate at or above [`SUGGEST_THRESHOLD`], if any.
///
/// Ties keep the first candidate seen.
pub fn suggest<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(query, candidate);
        if score >= SUGGEST_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(name, _)| name)
}
