// file: src/store/loader.rs
// description: all-or-nothing corpus loading with per-record validation
// reference: corpus source is a flat json document (category -> entry records)

use crate::error::{ResumeError, Result};
use crate::models::{Category, DateRange, Entry, MetricValue};
use crate::store::Corpus;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Raw entry record as it appears in the source document. Required fields are
/// optional here so missing ones produce a `MalformedCorpus` diagnostic
/// naming the offending record instead of a bare deserialization error.
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: Option<String>,
    title: Option<String>,
    company: Option<String>,
    body: Option<String>,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    metrics: Vec<MetricValue>,
    duration: Option<String>,
}

pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<Corpus> {
        let source = std::fs::read_to_string(path)?;
        let corpus = self.load_from_str(&source)?;
        info!(
            "Loaded corpus from {} ({} entries, fingerprint {})",
            path.display(),
            corpus.len(),
            &corpus.fingerprint()[..12]
        );
        Ok(corpus)
    }

    /// Parse and validate a corpus source. No partial corpus is ever
    /// produced: the first malformed record fails the whole load.
    pub fn load_from_str(&self, source: &str) -> Result<Corpus> {
        let fingerprint = Self::fingerprint(source);

        let mut raw: HashMap<String, Vec<RawEntry>> =
            serde_json::from_str(source).map_err(|e| ResumeError::MalformedCorpus {
                entry: "<document>".to_string(),
                message: e.to_string(),
            })?;

        let mut entries = Vec::new();

        // Fixed category order keeps insertion order independent of map
        // iteration order.
        for category in Category::all() {
            let Some(records) = raw.remove(category.as_str()) else {
                continue;
            };
            for record in records {
                entries.push(self.validate_record(category, record)?);
            }
        }

        if let Some(unknown) = raw.keys().next() {
            return Err(ResumeError::MalformedCorpus {
                entry: unknown.clone(),
                message: "unknown category".to_string(),
            });
        }

        debug!("Validated {} corpus entries", entries.len());
        Corpus::from_entries(entries, fingerprint)
    }

    fn validate_record(&self, category: Category, record: RawEntry) -> Result<Entry> {
        let id = match record.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                return Err(ResumeError::MalformedCorpus {
                    entry: format!("<{category}>"),
                    message: "missing identifier".to_string(),
                });
            }
        };

        let body = match record.body {
            Some(body) if !body.trim().is_empty() => body,
            _ => {
                return Err(ResumeError::MalformedCorpus {
                    entry: id,
                    message: "missing body".to_string(),
                });
            }
        };

        let date_range = match record.duration {
            Some(duration) => Some(DateRange::parse(&duration).ok_or_else(|| {
                ResumeError::MalformedCorpus {
                    entry: id.clone(),
                    message: format!("unparseable duration: {duration}"),
                }
            })?),
            None => None,
        };

        for metric in &record.metrics {
            if !metric.value.is_finite() {
                return Err(ResumeError::MalformedCorpus {
                    entry: id.clone(),
                    message: format!("non-finite metric value for '{}'", metric.label),
                });
            }
        }

        Ok(Entry {
            id,
            category,
            title: record.title.unwrap_or_default(),
            organization: record.company,
            body,
            highlights: record.highlights,
            metrics: record.metrics,
            date_range,
        })
    }

    fn fingerprint(source: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricUnit;
    use pretty_assertions::assert_eq;

    fn loader() -> CorpusLoader {
        CorpusLoader::new()
    }

    #[test]
    fn test_load_minimal_corpus() {
        let source = r#"{
            "experience": [
                {
                    "id": "exp_a",
                    "title": "Engineer",
                    "company": "Acme",
                    "body": "built ML underwriting model 92% accuracy",
                    "highlights": ["92% automated risk assessment accuracy"],
                    "duration": "01/2019 - Present"
                }
            ],
            "skills": [
                { "id": "skills_technical", "title": "Technical", "body": "SQL, APIs" }
            ]
        }"#;

        let corpus = loader().load_from_str(source).unwrap();
        assert_eq!(corpus.len(), 2);

        let entry = corpus.get("exp_a").unwrap();
        assert_eq!(entry.category, Category::Experience);
        assert_eq!(entry.organization.as_deref(), Some("Acme"));
        assert!(entry.date_range.unwrap().is_current());
    }

    #[test]
    fn test_missing_identifier_is_malformed() {
        let source = r#"{ "skills": [ { "title": "Technical", "body": "SQL" } ] }"#;
        let err = loader().load_from_str(source).unwrap_err();
        assert!(matches!(err, ResumeError::MalformedCorpus { .. }));
    }

    #[test]
    fn test_missing_body_is_malformed_and_names_entry() {
        let source = r#"{ "skills": [ { "id": "skills_technical", "body": "  " } ] }"#;
        let err = loader().load_from_str(source).unwrap_err();
        match err {
            ResumeError::MalformedCorpus { entry, .. } => assert_eq!(entry, "skills_technical"),
            other => panic!("expected MalformedCorpus, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_identifiers_fail_load() {
        let source = r#"{
            "experience": [
                { "id": "exp_a", "body": "first" },
                { "id": "exp_a", "body": "second" }
            ]
        }"#;
        let err = loader().load_from_str(source).unwrap_err();
        assert!(matches!(err, ResumeError::DuplicateIdentifier(_)));
    }

    #[test]
    fn test_unknown_category_fails_load() {
        let source = r#"{ "hobbies": [ { "id": "h", "body": "chess" } ] }"#;
        let err = loader().load_from_str(source).unwrap_err();
        assert!(matches!(err, ResumeError::MalformedCorpus { .. }));
    }

    #[test]
    fn test_bad_duration_fails_load() {
        let source = r#"{
            "experience": [
                { "id": "exp_a", "body": "role", "duration": "a few years" }
            ]
        }"#;
        let err = loader().load_from_str(source).unwrap_err();
        assert!(matches!(err, ResumeError::MalformedCorpus { .. }));
    }

    #[test]
    fn test_metrics_are_tagged_at_load() {
        let source = r#"{
            "metrics": [
                {
                    "id": "key_metrics",
                    "title": "Business impact",
                    "body": "revenue impact across roles",
                    "metrics": [
                        { "label": "new revenue", "value": 5000000.0, "unit": "usd" }
                    ]
                }
            ]
        }"#;

        let corpus = loader().load_from_str(source).unwrap();
        let entry = corpus.get("key_metrics").unwrap();
        assert_eq!(entry.metrics.len(), 1);
        assert_eq!(entry.metrics[0].unit, MetricUnit::Usd);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let source = r#"{ "summary": [ { "id": "s", "body": "profile" } ] }"#;
        let first = loader().load_from_str(source).unwrap();
        let second = loader().load_from_str(source).unwrap();
        assert_eq!(first.fingerprint(), second.fingerprint());
    }
}
