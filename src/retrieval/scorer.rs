// file: src/retrieval/scorer.rs
// description: field-weighted keyword overlap scoring
// reference: weights are tunable configuration, not contract

use crate::config::RetrievalConfig;
use crate::models::{Entry, MatchBreakdown};
use crate::retrieval::tokenizer::token_set;
use std::collections::{BTreeSet, HashSet};

/// Relative importance of each entry field. Identifier/title matches rank
/// above highlight matches, which rank above body matches.
#[derive(Debug, Clone, Copy)]
pub struct FieldWeights {
    pub title: f64,
    pub highlight: f64,
    pub body: f64,
}

impl FieldWeights {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            title: config.weight_title,
            highlight: config.weight_highlight,
            body: config.weight_body,
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 3.0,
            highlight: 2.0,
            body: 1.0,
        }
    }
}

/// Pre-tokenized entry fields, computed once per corpus since entries are
/// immutable after load.
#[derive(Debug, Clone)]
pub struct EntryTokens {
    title: HashSet<String>,
    highlights: HashSet<String>,
    body: HashSet<String>,
}

impl EntryTokens {
    pub fn from_entry(entry: &Entry) -> Self {
        let mut highlights = HashSet::new();
        for highlight in &entry.highlights {
            highlights.extend(token_set(highlight));
        }

        Self {
            title: token_set(&entry.heading()),
            highlights,
            body: token_set(&entry.body),
        }
    }

    /// Weighted count of query token matches across fields. A token matching
    /// several fields contributes each field's weight once.
    pub fn score(&self, query_tokens: &[String], weights: &FieldWeights) -> ScoreOutcome {
        let mut score = 0.0;
        let mut matched = BTreeSet::new();
        let mut breakdown = MatchBreakdown::default();

        for token in query_tokens {
            let mut hit = false;

            if self.title.contains(token) {
                score += weights.title;
                breakdown.title += 1;
                hit = true;
            }
            if self.highlights.contains(token) {
                score += weights.highlight;
                breakdown.highlights += 1;
                hit = true;
            }
            if self.body.contains(token) {
                score += weights.body;
                breakdown.body += 1;
                hit = true;
            }

            if hit {
                matched.insert(token.clone());
            }
        }

        ScoreOutcome {
            score,
            matched: matched.into_iter().collect(),
            breakdown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub score: f64,
    pub matched: Vec<String>,
    pub breakdown: MatchBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn entry() -> Entry {
        Entry {
            id: "experience_acme".to_string(),
            category: Category::Experience,
            title: "Senior Product Manager".to_string(),
            organization: Some("Acme".to_string()),
            body: "built ML underwriting model with 92% accuracy".to_string(),
            highlights: vec!["92% automated risk assessment accuracy".to_string()],
            metrics: vec![],
            date_range: None,
        }
    }

    #[test]
    fn test_title_match_outweighs_body_match() {
        let tokens = EntryTokens::from_entry(&entry());
        let weights = FieldWeights::default();

        let title_hit = tokens.score(&["manager".to_string()], &weights);
        let body_hit = tokens.score(&["underwriting".to_string()], &weights);

        assert!(title_hit.score > body_hit.score);
        assert_eq!(title_hit.breakdown.title, 1);
        assert_eq!(body_hit.breakdown.body, 1);
    }

    #[test]
    fn test_cross_field_token_counts_each_field_once() {
        let tokens = EntryTokens::from_entry(&entry());
        let weights = FieldWeights::default();

        // "accuracy" appears in both highlights and body.
        let outcome = tokens.score(&["accuracy".to_string()], &weights);
        assert_eq!(outcome.score, weights.highlight + weights.body);
        assert_eq!(outcome.matched, vec!["accuracy".to_string()]);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let tokens = EntryTokens::from_entry(&entry());
        let outcome = tokens.score(&["kubernetes".to_string()], &FieldWeights::default());
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.matched.is_empty());
    }

    #[test]
    fn test_identifier_tokens_are_searchable() {
        let tokens = EntryTokens::from_entry(&entry());
        let outcome = tokens.score(&["acme".to_string()], &FieldWeights::default());
        assert!(outcome.score > 0.0);
        assert_eq!(outcome.breakdown.title, 1);
    }
}
