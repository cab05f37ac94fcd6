// file: src/eval/cases.rs
// description: canned evaluation cases with expected keywords and citations

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub id: String,
    pub query: String,
    pub category: String,
    pub expected_keywords: Vec<String>,
    /// Entries that should appear in the ranked results; used for
    /// retrieval@k and reciprocal-rank metrics.
    #[serde(default)]
    pub expected_citations: Vec<String>,
    pub min_score: f64,
}

impl EvalCase {
    fn new(
        id: &str,
        query: &str,
        category: &str,
        expected_keywords: &[&str],
        expected_citations: &[&str],
        min_score: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            query: query.to_string(),
            category: category.to_string(),
            expected_keywords: expected_keywords.iter().map(|s| s.to_string()).collect(),
            expected_citations: expected_citations.iter().map(|s| s.to_string()).collect(),
            min_score,
        }
    }
}

/// Keyword coverage of a response: found / expected, case-insensitive
/// substring matching.
pub fn keyword_score(response: &str, expected: &[String]) -> (f64, Vec<String>) {
    if expected.is_empty() {
        return (0.0, vec![]);
    }

    let haystack = response.to_lowercase();
    let found: Vec<String> = expected
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .cloned()
        .collect();

    (found.len() as f64 / expected.len() as f64, found)
}

/// Load cases from a JSON file, for suites maintained outside the binary.
pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>> {
    let source = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// The built-in hiring-manager suite, pinned to the shipped corpus.
pub fn builtin_cases() -> Vec<EvalCase> {
    vec![
        EvalCase::new(
            "ai_ml_overview",
            "What AI and ML experience does the candidate have?",
            "ai_ml",
            &["92%", "ML-powered", "underwriting model", "AI adoption"],
            &["experience_harborline", "skills_ai_ml"],
            0.75,
        ),
        EvalCase::new(
            "underwriting_model",
            "Tell me about the underwriting model",
            "ai_ml",
            &["92% accuracy", "automated risk assessment", "human-in-loop"],
            &["experience_harborline"],
            0.66,
        ),
        EvalCase::new(
            "revenue_impact",
            "What revenue impact has the candidate delivered?",
            "metrics",
            &["$5M", "$4M", "$20M", "$800K"],
            &["key_metrics"],
            0.7,
        ),
        EvalCase::new(
            "operational_efficiency",
            "How has the candidate improved operational efficiency?",
            "metrics",
            &["85%", "90%"],
            &["experience_copperkettle"],
            0.5,
        ),
        EvalCase::new(
            "companies_worked",
            "Which companies has the candidate worked at?",
            "experience",
            &["Harborline", "Brightvault", "Loomhouse", "Copper Kettle"],
            &["summary_profile"],
            0.75,
        ),
        EvalCase::new(
            "harborline_detail",
            "Tell me about the candidate's experience at Harborline",
            "experience",
            &["Senior Product Manager", "compliance", "risk"],
            &["experience_harborline"],
            0.66,
        ),
        EvalCase::new(
            "mobile_launches",
            "Tell me about mobile app launches",
            "experience",
            &["iOS", "Android", "300K", "$20M"],
            &["experience_loomhouse"],
            0.75,
        ),
        EvalCase::new(
            "migration_projects",
            "What migration projects has the candidate led?",
            "experience",
            &["92% of accounts", "1.5M users", "zero disruption"],
            &["experience_brightvault"],
            0.66,
        ),
        EvalCase::new(
            "technical_skills",
            "What technical skills does the candidate have?",
            "skills",
            &["SQL", "API", "platform architecture"],
            &["skills_technical"],
            0.66,
        ),
        EvalCase::new(
            "regulated_industries",
            "Does the candidate have experience with regulated industries?",
            "domain",
            &["fintech", "insurance", "compliance", "regulatory"],
            &["skills_domain"],
            0.7,
        ),
        EvalCase::new(
            "leadership",
            "What leadership experience does the candidate have?",
            "leadership",
            &["coaching", "mentoring", "cross-functional"],
            &["skills_leadership"],
            0.66,
        ),
        EvalCase::new(
            "education",
            "What education does the candidate have?",
            "education",
            &["Information Systems", "Computer Science", "Lakeside"],
            &["education_ms", "education_bs"],
            0.66,
        ),
        EvalCase::new(
            "ai_pm_fit",
            "Why is the candidate a good fit for an AI product role?",
            "fit",
            &["AI", "product", "regulated"],
            &["experience_harborline", "skills_ai_ml", "summary_profile"],
            0.66,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_keyword_score_counts_found_keywords() {
        let expected = vec!["92%".to_string(), "$5M".to_string(), "Kubernetes".to_string()];
        let (score, found) = keyword_score("shipped a model with 92% accuracy and $5M revenue", &expected);

        assert!((score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(found, vec!["92%".to_string(), "$5M".to_string()]);
    }

    #[test]
    fn test_keyword_score_is_case_insensitive() {
        let expected = vec!["ML-Powered".to_string()];
        let (score, _) = keyword_score("ml-powered underwriting", &expected);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_builtin_cases_are_well_formed() {
        let cases = builtin_cases();
        assert_eq!(cases.len(), 13);
        for case in &cases {
            assert!(!case.query.is_empty());
            assert!(!case.expected_keywords.is_empty());
            assert!((0.0..=1.0).contains(&case.min_score));
        }
    }

    #[test]
    fn test_load_cases_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.json");
        fs::write(
            &path,
            serde_json::to_string_pretty(&builtin_cases()).unwrap(),
        )
        .unwrap();

        let loaded = load_cases(&path).unwrap();
        assert_eq!(loaded.len(), builtin_cases().len());
        assert_eq!(loaded[0].id, "ai_ml_overview");
    }
}
