//! Text normalization - the canonical form used for every comparison
//!
//! Normalization is a pure function: same input always yields the same
//! output. All similarity metrics operate on normalized text so that
//! formatting noise (case, punctuation, smart quotes, links) never
//! influences a duplicate verdict.

use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)[^\s]+").expect("url pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").expect("email pattern"));

/// Produce the canonical comparison form of free text
///
/// Applied steps, in order:
/// 1. Typographic quotes and dashes mapped to ASCII equivalents
/// 2. Lower-casing
/// 3. URLs and e-mail addresses stripped
/// 4. Punctuation removed - apostrophes deleted in place (so "don't"
///    stays one word), everything else replaced by a space to preserve
///    word boundaries
/// 5. Whitespace collapsed to single spaces, ends trimmed
///
/// # Examples
///
/// ```
/// use petition_domain::normalize::normalize;
///
/// assert_eq!(normalize("  Fix   the ROAD!  "), "fix the road");
/// assert_eq!(normalize("See https://example.org/plan now"), "see now");
/// ```
pub fn normalize(text: &str) -> String {
    let ascii: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' => '-',
            _ => c,
        })
        .collect();

    let lowered = ascii.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, " ");
    let without_emails = EMAIL_RE.replace_all(&without_urls, " ");

    let mut cleaned = String::with_capacity(without_emails.len());
    for c in without_emails.chars() {
        if c.is_alphanumeric() {
            cleaned.push(c);
        } else if c == '\'' {
            // dropped without breaking the word apart
        } else {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
