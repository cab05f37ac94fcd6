// file: src/models/scored_result.rs
// description: Scored retrieval result with citation provenance
// reference: produced fresh per query, never persisted

use crate::models::Category;
use serde::{Deserialize, Serialize};

/// Per-field breakdown of token matches behind a score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub title: usize,
    pub highlights: usize,
    pub body: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Entry identifier; always resolvable against the corpus it was scored
    /// from (no dangling citations).
    pub citation: String,

    pub category: Category,

    /// Entry title, for display without a second lookup.
    pub title: String,

    /// Weighted keyword overlap (higher is more relevant).
    pub score: f64,

    /// Query tokens that matched any field, sorted for determinism.
    pub matched: Vec<String>,

    pub breakdown: MatchBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_citation_and_breakdown() {
        let result = ScoredResult {
            citation: "experience_acme".to_string(),
            category: Category::Experience,
            title: "Senior Product Manager".to_string(),
            score: 5.0,
            matched: vec!["ml".to_string(), "model".to_string()],
            breakdown: MatchBreakdown {
                title: 1,
                highlights: 1,
                body: 0,
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["citation"], "experience_acme");
        assert_eq!(value["breakdown"]["title"], 1);
    }
}
