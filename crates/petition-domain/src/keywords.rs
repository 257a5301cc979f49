//! Keyword extraction from normalized text
//!
//! Keywords are the significant tokens a text is "about": long enough to
//! carry meaning, not a stop word, not purely numeric. They feed the
//! Jaccard metric (as a set) and the positional-overlap signal (as an
//! ordered list).

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default minimum keyword length (in characters)
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 3;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "about", "above", "after", "again", "all", "also", "and", "any", "are", "because",
        "been", "before", "being", "between", "both", "but", "can", "could", "did", "does",
        "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has",
        "have", "having", "her", "here", "him", "his", "how", "into", "its", "itself",
        "just", "more", "most", "not", "now", "off", "once", "only", "other", "our", "out",
        "over", "own", "same", "she", "should", "some", "such", "than", "that", "the",
        "their", "them", "then", "there", "these", "they", "this", "those", "through",
        "too", "under", "until", "very", "was", "were", "what", "when", "where", "which",
        "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

fn is_keyword(token: &str, min_len: usize) -> bool {
    if token.chars().count() < min_len {
        return false;
    }
    if STOP_WORDS.contains(token) {
        return false;
    }
    // Purely numeric tokens (years, amounts) say nothing about the topic
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    true
}

/// Extract the keyword set of a normalized text
///
/// Output is unordered and deduplicated. Callers are expected to pass text
/// that went through [`crate::normalize::normalize`]; survivors are
/// lower-cased again so the guarantee holds regardless.
///
/// # Examples
///
/// ```
/// use petition_domain::keywords::keyword_set;
///
/// let set = keyword_set("repair the main road in 2024", 3);
/// assert!(set.contains("repair"));
/// assert!(!set.contains("the"));   // stop word
/// assert!(!set.contains("in"));    // too short
/// assert!(!set.contains("2024"));  // numeric
/// ```
pub fn keyword_set(normalized: &str, min_len: usize) -> HashSet<String> {
    normalized
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .filter(|t| is_keyword(t, min_len))
        .collect()
}

/// Extract keywords preserving first-occurrence order
///
/// Deduplicated; used by the positional-overlap signal, where keywords
/// appearing earlier in the text count for more.
pub fn keyword_list(normalized: &str, min_len: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for token in normalized.split_whitespace() {
        let token = token.to_lowercase();
        if is_keyword(&token, min_len) && seen.insert(token.clone()) {
            ordered.push(token);
        }
    }
    ordered
}
