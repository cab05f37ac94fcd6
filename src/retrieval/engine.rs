// file: src/retrieval/engine.rs
// description: ranked keyword retrieval over the corpus
// reference: pure function of (corpus snapshot, query); no cross-call state

use crate::config::RetrievalConfig;
use crate::error::{ResumeError, Result};
use crate::models::{Category, ScoredResult};
use crate::retrieval::scorer::{EntryTokens, FieldWeights};
use crate::retrieval::tokenizer::tokenize;
use std::sync::Arc;
use tracing::debug;

pub struct RetrievalEngine {
    corpus: Arc<crate::store::Corpus>,
    weights: FieldWeights,
    default_top_k: usize,
    // Aligned with corpus insertion order; entries are immutable so field
    // tokenization happens exactly once.
    index: Vec<EntryTokens>,
}

impl RetrievalEngine {
    pub fn new(corpus: Arc<crate::store::Corpus>, config: &RetrievalConfig) -> Self {
        let index = corpus.iter().map(EntryTokens::from_entry).collect();

        Self {
            corpus,
            weights: FieldWeights::from_config(config),
            default_top_k: config.top_k,
            index,
        }
    }

    pub fn corpus(&self) -> &crate::store::Corpus {
        &self.corpus
    }

    /// Free-text search across the whole corpus. An empty result set is a
    /// valid "no match" outcome, not an error.
    pub fn search(&self, query: &str, top_k: Option<usize>) -> Result<Vec<ScoredResult>> {
        self.run(query, None, top_k)
    }

    /// Category-scoped search; the filter applies before scoring.
    pub fn search_in_category(
        &self,
        query: &str,
        category: Category,
        top_k: Option<usize>,
    ) -> Result<Vec<ScoredResult>> {
        self.run(query, Some(category), top_k)
    }

    fn run(
        &self,
        query: &str,
        filter: Option<Category>,
        top_k: Option<usize>,
    ) -> Result<Vec<ScoredResult>> {
        if query.trim().is_empty() {
            return Err(ResumeError::InvalidQuery("empty query".to_string()));
        }

        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Err(ResumeError::InvalidQuery(format!(
                "no searchable tokens in query: {query}"
            )));
        }

        let top_k = top_k.unwrap_or(self.default_top_k);

        let mut results: Vec<ScoredResult> = self
            .corpus
            .iter()
            .zip(self.index.iter())
            .filter(|(entry, _)| filter.is_none_or(|c| entry.category == c))
            .filter_map(|(entry, tokens)| {
                let outcome = tokens.score(&query_tokens, &self.weights);
                if outcome.score <= 0.0 {
                    return None;
                }
                Some(ScoredResult {
                    citation: entry.id.clone(),
                    category: entry.category,
                    title: entry.title.clone(),
                    score: outcome.score,
                    matched: outcome.matched,
                    breakdown: outcome.breakdown,
                })
            })
            .collect();

        // Stable sort keeps corpus order as the tie-break, so repeated calls
        // return identical orderings.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).expect("scores are finite"));
        results.truncate(top_k);

        debug!(
            "Query '{}' matched {} entries (top_k {})",
            query,
            results.len(),
            top_k
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::CorpusLoader;

    fn engine() -> RetrievalEngine {
        let source = r#"{
            "summary": [
                {
                    "id": "summary_profile",
                    "title": "Professional summary",
                    "body": "product manager with platform and compliance background"
                }
            ],
            "experience": [
                {
                    "id": "experience_acme",
                    "title": "Senior Product Manager",
                    "company": "Acme",
                    "body": "built ML underwriting model 92% accuracy",
                    "highlights": ["92% automated risk assessment accuracy"],
                    "duration": "01/2019 - Present"
                },
                {
                    "id": "experience_globex",
                    "title": "Product Manager",
                    "company": "Globex",
                    "body": "launched loyalty mobile app on iOS and Android",
                    "highlights": ["300K downloads in first quarter"],
                    "duration": "06/2015 - 12/2018"
                }
            ],
            "skills": [
                {
                    "id": "skills_technical",
                    "title": "Technical",
                    "body": "SQL, API design, platform architecture"
                }
            ]
        }"#;

        let corpus = CorpusLoader::new().load_from_str(source).unwrap();
        RetrievalEngine::new(Arc::new(corpus), &Config::default_config().retrieval)
    }

    #[test]
    fn test_single_match_with_citation() {
        let engine = engine();
        let results = engine.search("ML accuracy", None).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].citation, "experience_acme");
        assert!(results[0].score > 0.0);
    }

    #[test]
    fn test_all_citations_resolve() {
        let engine = engine();
        let results = engine.search("product manager platform", None).unwrap();

        assert!(!results.is_empty());
        for result in &results {
            let entry = engine.corpus().get(&result.citation).unwrap();
            assert_eq!(entry.id, result.citation);
        }
    }

    #[test]
    fn test_no_overlap_is_empty_not_error() {
        let engine = engine();
        let results = engine.search("kubernetes helm charts", None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_query_is_invalid() {
        let engine = engine();
        assert!(matches!(
            engine.search("", None),
            Err(ResumeError::InvalidQuery(_))
        ));
        assert!(matches!(
            engine.search("the and of", None),
            Err(ResumeError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_search_is_idempotent() {
        let engine = engine();
        let first = engine.search("product manager", Some(5)).unwrap();
        let second = engine.search("product manager", Some(5)).unwrap();

        let first_ids: Vec<&str> = first.iter().map(|r| r.citation.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.citation.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_ties_break_by_corpus_order() {
        let engine = engine();
        // "manager" hits the title of both experience entries with the same
        // weight; corpus order must decide.
        let results = engine.search_in_category("manager", Category::Experience, None).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].citation, "experience_acme");
        assert_eq!(results[1].citation, "experience_globex");
    }

    #[test]
    fn test_top_k_larger_than_matches_returns_all() {
        let engine = engine();
        let results = engine.search("product", Some(50)).unwrap();
        assert!(results.len() <= 4);
        assert!(!results.is_empty());
    }

    #[test]
    fn test_category_filter_applies_before_scoring() {
        let engine = engine();
        let results = engine
            .search_in_category("product", Category::Skills, None)
            .unwrap();
        for result in &results {
            assert_eq!(result.category, Category::Skills);
        }
    }
}
