use std::collections::HashMap;

/// Tokens shorter than this are not features
pub const MIN_TOKEN_LEN: usize = 2;

/// Count the n-grams of a whitespace-tokenized document for every size in `ngram_range`.
///
/// Single-character tokens are dropped before n-grams are formed, so they neither become features
/// nor join their neighbours into bigrams.
pub fn count_ngrams(text: &str, ngram_range: (usize, usize)) -> HashMap<String, usize> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .collect();
    let (min_n, max_n) = ngram_range;

    let mut counts = HashMap::new();

    for n in min_n.max(1)..=max_n {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }

    counts
}
