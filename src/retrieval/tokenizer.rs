// file: src/retrieval/tokenizer.rs
// description: query and field tokenization with stop-word removal
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Word-like runs, keeping currency/percent markers so "$5M" and "92%"
    // survive tokenization intact.
    static ref TOKEN: Regex =
        Regex::new(r"\$?[a-z0-9]+(?:\.[0-9]+)?%?").expect("TOKEN regex is valid");

    static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "an", "and", "are", "as", "at", "be", "by", "do", "does", "for",
        "from", "had", "has", "have", "his", "her", "how", "in", "is", "it",
        "me", "of", "on", "or", "s", "tell", "that", "the", "their", "to",
        "was", "what", "which", "with",
    ]
    .into_iter()
    .collect();
}

/// Lowercase, strip punctuation, split on whitespace, discard stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|token| !STOP_WORDS.contains(token.as_str()))
        .collect()
}

/// Deduplicated token set for match lookups over a corpus field.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tokens = tokenize("Built ML-powered underwriting model!");
        assert_eq!(tokens, vec!["built", "ml", "powered", "underwriting", "model"]);
    }

    #[test]
    fn test_stop_words_removed() {
        let tokens = tokenize("What is the experience at Acme?");
        assert_eq!(tokens, vec!["experience", "acme"]);
    }

    #[test]
    fn test_metric_markers_survive() {
        let tokens = tokenize("92% accuracy and $5M revenue");
        assert!(tokens.contains(&"92%".to_string()));
        assert!(tokens.contains(&"$5m".to_string()));
    }

    #[test]
    fn test_only_stop_words_yields_empty() {
        assert!(tokenize("the and of").is_empty());
        assert!(tokenize("").is_empty());
        assert!(tokenize("?!").is_empty());
    }

    #[test]
    fn test_token_set_deduplicates() {
        let set = token_set("model model MODEL");
        assert_eq!(set.len(), 1);
        assert!(set.contains("model"));
    }
}
