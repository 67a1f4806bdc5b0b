//! Relevance ranking of search candidates

use crate::types::Candidate;

/// Number of top candidates that survive filtering regardless of score
pub const GUARANTEED_CANDIDATES: usize = 3;

/// Query tokens this short are ignored
const MIN_TOKEN_CHARS: usize = 3;

/// Score a candidate page against a query.
///
/// Per query token (lowercased, at least three chars): +3 when it occurs in
/// the URL, +2 when it occurs in the title. Task-oriented pages get a bonus
/// and bare product roots a penalty.
pub fn score(url: &str, title: &str, query: &str) -> i32 {
    let url = url.to_lowercase();
    let title = title.to_lowercase();
    let query = query.to_lowercase();

    let mut score = 0;
    for token in query
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
    {
        if url.contains(token) {
            score += 3;
        }
        if title.contains(token) {
            score += 2;
        }
    }

    if url.contains("/how-to/") || url.contains("/configure") {
        score += 2;
    }
    if url.contains("/quickstart") {
        score += 1;
    }
    if url.ends_with("/docs") || url.ends_with("/docs/") {
        score -= 1;
    }

    score
}

/// Score, order and filter candidates.
///
/// Sorting is stable, so equal scores keep their discovery order. Entries
/// with a negative score are dropped unless they rank within the first
/// [`GUARANTEED_CANDIDATES`].
pub fn rank(mut candidates: Vec<Candidate>, query: &str) -> Vec<Candidate> {
    for candidate in &mut candidates {
        candidate.score = score(&candidate.url, &candidate.title, query);
    }
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    candidates
        .into_iter()
        .enumerate()
        .filter(|(i, c)| c.score >= 0 || *i < GUARANTEED_CANDIDATES)
        .map(|(_, c)| c)
        .collect()
}
