// file: src/retrieval/answer.rs
// description: compact cited answer assembly with a fixed character budget
// reference: every bullet traces to a corpus entry; nothing is synthesized

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::models::{Category, ScoredResult};
use crate::store::Corpus;
use serde::{Deserialize, Serialize};

pub const NO_EVIDENCE_TEXT: &str = "• Not evidenced in the resume";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub entry_id: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactAnswer {
    /// Bullet lines, each suffixed with its `[entry_id]` citation.
    pub text: String,
    pub citations: Vec<Citation>,
    pub bullet_count: usize,
    pub char_count: usize,
    pub has_evidence: bool,
}

pub struct AnswerFormatter {
    char_budget: usize,
    max_bullets: usize,
}

impl AnswerFormatter {
    pub fn new(char_budget: usize, max_bullets: usize) -> Self {
        Self {
            char_budget,
            max_bullets,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.answer_char_budget, config.max_bullets)
    }

    /// Assemble ranked results into compact bullets. Truncation to the
    /// character budget happens on whole bullet lines, never mid-line.
    pub fn format(&self, results: &[ScoredResult], corpus: &Corpus) -> Result<CompactAnswer> {
        if results.is_empty() {
            return Ok(CompactAnswer {
                text: NO_EVIDENCE_TEXT.to_string(),
                citations: vec![],
                bullet_count: 1,
                char_count: NO_EVIDENCE_TEXT.chars().count(),
                has_evidence: false,
            });
        }

        let mut bullets: Vec<(String, Citation)> = Vec::new();

        for result in results {
            let entry = corpus.get(&result.citation)?;

            let headline = match (&entry.organization, &entry.date_range) {
                (Some(org), Some(range)) => format!("{} at {} ({})", entry.title, org, range),
                (Some(org), None) => format!("{} at {}", entry.title, org),
                _ if entry.category == Category::Skills && !entry.body.is_empty() => {
                    format!("{}: {}", entry.title, entry.body)
                }
                _ => entry.title.clone(),
            };

            bullets.push((
                format!("• {} [{}]", headline, entry.id),
                Citation {
                    entry_id: entry.id.clone(),
                    excerpt: headline,
                },
            ));

            for highlight in &entry.highlights {
                bullets.push((
                    format!("• {} [{}]", highlight, entry.id),
                    Citation {
                        entry_id: entry.id.clone(),
                        excerpt: highlight.clone(),
                    },
                ));
            }
        }

        bullets.truncate(self.max_bullets);

        // Keep whole bullets while they fit the budget (joined by newlines).
        let mut kept: Vec<(String, Citation)> = Vec::new();
        let mut char_count = 0;
        for (line, citation) in bullets {
            let line_len = line.chars().count();
            let separator = usize::from(!kept.is_empty());
            if char_count + separator + line_len > self.char_budget {
                break;
            }
            char_count += separator + line_len;
            kept.push((line, citation));
        }

        let (lines, citations): (Vec<String>, Vec<Citation>) = kept.into_iter().unzip();
        let text = lines.join("\n");

        Ok(CompactAnswer {
            bullet_count: lines.len(),
            char_count: text.chars().count(),
            text,
            citations,
            has_evidence: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::retrieval::RetrievalEngine;
    use crate::store::CorpusLoader;
    use std::sync::Arc;

    fn corpus() -> Arc<Corpus> {
        let source = r#"{
            "experience": [
                {
                    "id": "experience_acme",
                    "title": "Senior Product Manager",
                    "company": "Acme",
                    "body": "built ML underwriting model 92% accuracy",
                    "highlights": [
                        "Shipped ML-powered underwriting model with 92% accuracy",
                        "Cut manual review workload by 85%"
                    ],
                    "duration": "01/2019 - Present"
                }
            ]
        }"#;
        Arc::new(CorpusLoader::new().load_from_str(source).unwrap())
    }

    fn results(corpus: &Arc<Corpus>) -> Vec<ScoredResult> {
        let engine = RetrievalEngine::new(
            Arc::clone(corpus),
            &Config::default_config().retrieval,
        );
        engine.search("ML underwriting accuracy", None).unwrap()
    }

    #[test]
    fn test_every_bullet_carries_a_citation() {
        let corpus = corpus();
        let answer = AnswerFormatter::new(700, 6)
            .format(&results(&corpus), &corpus)
            .unwrap();

        assert!(answer.has_evidence);
        assert_eq!(answer.bullet_count, answer.citations.len());
        for line in answer.text.lines() {
            assert!(line.ends_with("[experience_acme]"), "uncited line: {line}");
        }
    }

    #[test]
    fn test_citations_resolve_against_corpus() {
        let corpus = corpus();
        let answer = AnswerFormatter::new(700, 6)
            .format(&results(&corpus), &corpus)
            .unwrap();

        for citation in &answer.citations {
            assert!(corpus.get(&citation.entry_id).is_ok());
        }
    }

    #[test]
    fn test_budget_truncates_whole_bullets() {
        let corpus = corpus();
        let answer = AnswerFormatter::new(80, 6)
            .format(&results(&corpus), &corpus)
            .unwrap();

        assert!(answer.char_count <= 80);
        assert!(answer.bullet_count >= 1);
        // No mid-line cuts: every kept line is a complete cited bullet.
        for line in answer.text.lines() {
            assert!(line.starts_with("• "));
            assert!(line.ends_with(']'));
        }
    }

    #[test]
    fn test_no_results_is_not_evidenced() {
        let corpus = corpus();
        let answer = AnswerFormatter::new(700, 6).format(&[], &corpus).unwrap();

        assert!(!answer.has_evidence);
        assert_eq!(answer.text, NO_EVIDENCE_TEXT);
        assert!(answer.citations.is_empty());
    }

    #[test]
    fn test_max_bullets_cap() {
        let corpus = corpus();
        let answer = AnswerFormatter::new(700, 2)
            .format(&results(&corpus), &corpus)
            .unwrap();
        assert!(answer.bullet_count <= 2);
    }
}
