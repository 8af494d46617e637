//! Keyword density scoring.
//!
//! `hits / (hits + keywords)`, where `hits` is the total number of
//! case-insensitive, non-overlapping substring occurrences of every keyword
//! and `keywords` is the length of the keyword list, duplicates included.
//! Zero hits score exactly 0; the score approaches but never reaches 1.

/// Total case-insensitive substring occurrences of `keywords` in `text`.
pub fn keyword_hits<S: AsRef<str>>(text: &str, keywords: &[S]) -> usize {
    let text = text.to_lowercase();
    keywords
        .iter()
        .map(|k| text.matches(k.as_ref().to_lowercase().as_str()).count())
        .sum()
}

/// Score `text` against `keywords`.
pub fn score<S: AsRef<str>>(text: &str, keywords: &[S]) -> f64 {
    density(keyword_hits(text, keywords), keywords.len())
}

/// The saturating density function on raw counts.
pub fn density(hits: usize, total_keywords: usize) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    hits as f64 / (hits + total_keywords) as f64
}
