//! Similarity metrics
//!
//! Four independent scorers, each returning a value in [0, 1] where 1 means
//! identical. Empty input scores 0 by definition (not by formula), which
//! keeps every metric free of divide-by-zero cases.
//!
//! All metrics operate on text that already went through
//! [`crate::normalize::normalize`]; none of them normalize internally.

use std::collections::{HashMap, HashSet};

/// Edit-distance similarity: `1 - levenshtein(a, b) / max(|a|, |b|)`
///
/// Computed over chars with the standard dynamic-programming table,
/// space-optimized to two rows. Either input empty scores 0.
///
/// # Examples
///
/// ```
/// use petition_domain::similarity::levenshtein_similarity;
///
/// assert_eq!(levenshtein_similarity("road", "road"), 1.0);
/// assert_eq!(levenshtein_similarity("road", ""), 0.0);
/// assert!(levenshtein_similarity("road", "roads") > 0.7);
/// ```
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());

    let distance = levenshtein_distance(&a_chars, &b_chars);
    1.0 - distance as f64 / max_len as f64
}

/// Two-row Levenshtein distance over char slices
fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Jaccard similarity over keyword sets: `|a ∩ b| / |a ∪ b|`
///
/// Scores 0 if either set is empty.
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// TF-IDF cosine similarity over the two-document corpus {a, b}
///
/// Term frequencies come from whitespace tokens of each text; inverse
/// document frequency uses the smoothed form `ln((1 + N) / (1 + df)) + 1`
/// with N = 2, so terms present in both documents keep weight and two
/// identical texts score exactly 1. Scores 0 if either vector has zero
/// magnitude.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let tf_a = term_frequencies(a);
    let tf_b = term_frequencies(b);
    if tf_a.is_empty() || tf_b.is_empty() {
        return 0.0;
    }

    let vocabulary: HashSet<&String> = tf_a.keys().chain(tf_b.keys()).collect();

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for term in vocabulary {
        let df = usize::from(tf_a.contains_key(term)) + usize::from(tf_b.contains_key(term));
        let idf = (3.0 / (1.0 + df as f64)).ln() + 1.0;

        let wa = tf_a.get(term).copied().unwrap_or(0) as f64 * idf;
        let wb = tf_b.get(term).copied().unwrap_or(0) as f64 * idf;
        dot += wa * wb;
        mag_a += wa * wa;
        mag_b += wb * wb;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}

fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for token in text.split_whitespace() {
        *frequencies.entry(token.to_string()).or_insert(0) += 1;
    }
    frequencies
}

/// Position-boosted keyword overlap between two ordered keyword lists
///
/// A keyword at list index `i` carries harmonic weight `1 / (i + 1)`, so
/// keywords appearing earlier in a text dominate the score. The directional
/// score from `a` to `b` is the weight of `a`'s keywords also present in
/// `b`, divided by the total weight of `a`'s keywords; the result averages
/// both directions to stay symmetric. Scores 0 if either list is empty.
pub fn positional_overlap(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let forward = directional_overlap(a, b);
    let backward = directional_overlap(b, a);
    (forward + backward) / 2.0
}

fn directional_overlap(from: &[String], to: &[String]) -> f64 {
    let target: HashSet<&String> = to.iter().collect();

    let mut shared_weight = 0.0;
    let mut total_weight = 0.0;
    for (i, keyword) in from.iter().enumerate() {
        let weight = 1.0 / (i as f64 + 1.0);
        total_weight += weight;
        if target.contains(keyword) {
            shared_weight += weight;
        }
    }

    shared_weight / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn list(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein_similarity("budget request", "budget request"), 1.0);
    }

    #[test]
    fn test_levenshtein_empty_by_definition() {
        assert_eq!(levenshtein_similarity("", "road"), 0.0);
        assert_eq!(levenshtein_similarity("road", ""), 0.0);
        assert_eq!(levenshtein_similarity("", ""), 0.0);
    }

    #[test]
    fn test_levenshtein_single_edit() {
        // "repair" -> "repairs": one insertion over max length 7
        let score = levenshtein_similarity("repair", "repairs");
        assert!((score - (1.0 - 1.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_levenshtein_disjoint() {
        let score = levenshtein_similarity("abc", "xyz");
        assert!((score - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_levenshtein_unicode_chars_not_bytes() {
        // One char substitution over length 4, regardless of byte widths
        let score = levenshtein_similarity("caf\u{e9}s", "cafes");
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_jaccard_identical() {
        let a = set(&["road", "repair"]);
        assert_eq!(jaccard_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        let a = set(&["road"]);
        let empty = HashSet::new();
        assert_eq!(jaccard_similarity(&a, &empty), 0.0);
        assert_eq!(jaccard_similarity(&empty, &a), 0.0);
        assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let a = set(&["road", "repair", "budget"]);
        let b = set(&["road", "repair", "funding"]);
        // 2 shared, 4 in union
        assert!((jaccard_similarity(&a, &b) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_identical() {
        let text = "repair the main road";
        assert!((cosine_similarity(text, text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_empty() {
        assert_eq!(cosine_similarity("", "road repair"), 0.0);
        assert_eq!(cosine_similarity("road repair", ""), 0.0);
    }

    #[test]
    fn test_cosine_disjoint_vocabulary() {
        assert!((cosine_similarity("road repair", "park bench") - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_shared_terms_score_between() {
        let score = cosine_similarity("road repair budget", "road repair funding");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = "fix potholes on main street";
        let b = "main street potholes everywhere";
        assert!((cosine_similarity(a, b) - cosine_similarity(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_positional_overlap_identical() {
        let a = list(&["road", "repair", "budget"]);
        assert!((positional_overlap(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_positional_overlap_empty() {
        let a = list(&["road"]);
        assert_eq!(positional_overlap(&a, &[]), 0.0);
        assert_eq!(positional_overlap(&[], &a), 0.0);
    }

    #[test]
    fn test_positional_overlap_early_keywords_dominate() {
        let candidate = list(&["road", "repair", "budget", "request"]);
        let shares_first = list(&["road", "paving"]);
        let shares_last = list(&["request", "paving"]);
        assert!(
            positional_overlap(&candidate, &shares_first)
                > positional_overlap(&candidate, &shares_last)
        );
    }

    #[test]
    fn test_positional_overlap_symmetric() {
        let a = list(&["road", "repair", "budget"]);
        let b = list(&["budget", "road"]);
        assert!((positional_overlap(&a, &b) - positional_overlap(&b, &a)).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn word() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    fn text() -> impl Strategy<Value = String> {
        proptest::collection::vec(word(), 1..12).prop_map(|words| words.join(" "))
    }

    proptest! {
        /// Property: every metric scores identical non-empty strings as 1
        #[test]
        fn test_identity(s in text()) {
            prop_assert!((levenshtein_similarity(&s, &s) - 1.0).abs() < 1e-9);
            prop_assert!((cosine_similarity(&s, &s) - 1.0).abs() < 1e-9);
            let keywords: std::collections::HashSet<String> =
                s.split_whitespace().map(String::from).collect();
            prop_assert!((jaccard_similarity(&keywords, &keywords) - 1.0).abs() < 1e-9);
        }

        /// Property: every metric scores against-empty as exactly 0
        #[test]
        fn test_empty_is_zero(s in text()) {
            prop_assert_eq!(levenshtein_similarity(&s, ""), 0.0);
            prop_assert_eq!(cosine_similarity(&s, ""), 0.0);
            let keywords: std::collections::HashSet<String> =
                s.split_whitespace().map(String::from).collect();
            prop_assert_eq!(jaccard_similarity(&keywords, &std::collections::HashSet::new()), 0.0);
        }

        /// Property: every metric is symmetric
        #[test]
        fn test_symmetry(a in text(), b in text()) {
            prop_assert!(
                (levenshtein_similarity(&a, &b) - levenshtein_similarity(&b, &a)).abs() < 1e-12
            );
            prop_assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-12);
        }

        /// Property: every metric stays within [0, 1]
        #[test]
        fn test_range(a in text(), b in text()) {
            for score in [
                levenshtein_similarity(&a, &b),
                cosine_similarity(&a, &b),
            ] {
                prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            }
        }
    }
}
