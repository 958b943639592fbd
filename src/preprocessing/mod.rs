use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};

/// English stop words
pub mod stop_words;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Normalize raw text into a cleaned, single-space-joined string of stemmed tokens.
///
/// Every character outside `[a-zA-Z]` becomes a separator, tokens are lowercased, English stop
/// words are dropped and the remaining tokens are stemmed. The result is empty when nothing
/// survives filtering.
pub fn normalize<T: AsRef<str>>(text: T) -> String {
    let text = text.as_ref();

    let replaced: String = text
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c.to_ascii_lowercase() } else { ' ' })
        .collect();

    replaced
        .split_whitespace()
        .filter(|token| !stop_words::is_stop_word(token))
        .map(|token| STEMMER.stem(token))
        .filter(|stem| !stem.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a batch of texts, keeping input order
pub fn normalize_all<T: AsRef<str>>(texts: &[T]) -> Vec<String> {
    texts.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_stop_words() {
        let cleaned = normalize("The quick BROWN fox!!");

        assert_eq!(cleaned, "quick brown fox");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let text = "Breaking: Senators REJECTED the 2017 budget proposal, officials said.";

        assert_eq!(normalize(text), normalize(text));
    }

    #[test]
    fn test_normalize_output_alphabet() {
        let cleaned = normalize("  Héllo,\tWORLD!! 42 times... isn't it running?  ");

        assert!(!cleaned.is_empty());
        assert!(cleaned.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        assert!(!cleaned.contains("  "));
        assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
    }

    #[test]
    fn test_normalize_stems_tokens() {
        assert_eq!(normalize("running runners"), "run runner");
    }

    #[test]
    fn test_normalize_empty_after_filtering() {
        assert_eq!(normalize("the the the!!!"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("1234 ... ???"), "");
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let cleaned = normalize_all(&["Elections", "the", "budgets"]);

        assert_eq!(cleaned, vec!["elect", "", "budget"]);
    }
}
