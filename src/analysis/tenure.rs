// file: src/analysis/tenure.rs
// description: tenure and career progression over experience date ranges

use crate::error::{ResumeError, Result};
use crate::models::Category;
use crate::store::Corpus;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    pub citation: String,
    pub title: String,
    pub organization: Option<String>,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenureReport {
    pub total_years: i32,
    pub roles_held: usize,
    pub organizations: usize,
    pub current_role: Option<RoleSummary>,
    /// Experience entries in corpus order (most recent first by convention
    /// of the source document).
    pub progression: Vec<RoleSummary>,
}

/// Span from the earliest start year to the latest end year across dated
/// experience entries; ongoing roles extend the span to `current_year`.
pub fn calculate_tenure(corpus: &Corpus, current_year: i32) -> Result<TenureReport> {
    let experience = corpus.all(Some(Category::Experience));

    let dated: Vec<_> = experience
        .iter()
        .filter_map(|entry| entry.date_range.map(|range| (*entry, range)))
        .collect();

    if dated.is_empty() {
        return Err(ResumeError::NotFound(
            "no dated experience entries in corpus".to_string(),
        ));
    }

    let earliest_start = dated
        .iter()
        .map(|(_, range)| range.start_year)
        .min()
        .expect("dated is non-empty");
    let latest_end = dated
        .iter()
        .map(|(_, range)| range.end_year_or(current_year))
        .max()
        .expect("dated is non-empty");

    let progression: Vec<RoleSummary> = dated
        .iter()
        .map(|(entry, range)| RoleSummary {
            citation: entry.id.clone(),
            title: entry.title.clone(),
            organization: entry.organization.clone(),
            duration: range.to_string(),
        })
        .collect();

    let current_role = dated
        .iter()
        .find(|(_, range)| range.is_current())
        .map(|(entry, range)| RoleSummary {
            citation: entry.id.clone(),
            title: entry.title.clone(),
            organization: entry.organization.clone(),
            duration: range.to_string(),
        });

    let mut organizations: Vec<&str> = dated
        .iter()
        .filter_map(|(entry, _)| entry.organization.as_deref())
        .collect();
    organizations.sort_unstable();
    organizations.dedup();

    Ok(TenureReport {
        total_years: (latest_end - earliest_start).max(0),
        roles_held: progression.len(),
        organizations: organizations.len(),
        current_role,
        progression,
    })
}

/// Convenience wrapper pinned to the wall clock.
pub fn calculate_tenure_now(corpus: &Corpus) -> Result<TenureReport> {
    calculate_tenure(corpus, Utc::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CorpusLoader;

    fn corpus() -> Corpus {
        let source = r#"{
            "experience": [
                {
                    "id": "experience_acme",
                    "title": "Senior Product Manager",
                    "company": "Acme",
                    "body": "current role",
                    "duration": "01/2019 - Present"
                },
                {
                    "id": "experience_globex",
                    "title": "Product Manager",
                    "company": "Globex",
                    "body": "previous role",
                    "duration": "06/2015 - 12/2018"
                }
            ]
        }"#;
        CorpusLoader::new().load_from_str(source).unwrap()
    }

    #[test]
    fn test_span_covers_earliest_to_current_year() {
        let report = calculate_tenure(&corpus(), 2026).unwrap();
        assert_eq!(report.total_years, 11);
        assert_eq!(report.roles_held, 2);
        assert_eq!(report.organizations, 2);
    }

    #[test]
    fn test_current_role_detected() {
        let report = calculate_tenure(&corpus(), 2026).unwrap();
        let current = report.current_role.unwrap();
        assert_eq!(current.citation, "experience_acme");
        assert!(current.duration.ends_with("Present"));
    }

    #[test]
    fn test_closed_ranges_do_not_extend_to_now() {
        let source = r#"{
            "experience": [
                {
                    "id": "experience_globex",
                    "title": "PM",
                    "company": "Globex",
                    "body": "role",
                    "duration": "06/2015 - 12/2018"
                }
            ]
        }"#;
        let corpus = CorpusLoader::new().load_from_str(source).unwrap();
        let report = calculate_tenure(&corpus, 2026).unwrap();

        assert_eq!(report.total_years, 3);
        assert!(report.current_role.is_none());
    }

    #[test]
    fn test_no_experience_is_not_found() {
        let source = r#"{ "summary": [ { "id": "s", "body": "profile" } ] }"#;
        let corpus = CorpusLoader::new().load_from_str(source).unwrap();
        assert!(matches!(
            calculate_tenure(&corpus, 2026),
            Err(ResumeError::NotFound(_))
        ));
    }

    #[test]
    fn test_progression_preserves_corpus_order() {
        let report = calculate_tenure(&corpus(), 2026).unwrap();
        let ids: Vec<&str> = report
            .progression
            .iter()
            .map(|r| r.citation.as_str())
            .collect();
        assert_eq!(ids, vec!["experience_acme", "experience_globex"]);
    }
}
