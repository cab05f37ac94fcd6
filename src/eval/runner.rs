// file: src/eval/runner.rs
// description: evaluation suite runner with retrieval and latency metrics

use crate::error::Result;
use crate::eval::cases::{keyword_score, EvalCase};
use crate::ops::{OpArgs, OpRegistry};
use crate::utils::percentile;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub id: String,
    pub query: String,
    pub category: String,
    pub score: f64,
    pub passed: bool,
    pub found_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// 1-based rank of the first expected citation in the result list,
    /// None when no expected citation was retrieved.
    pub rank: Option<usize>,
    pub latency_ms: f64,
    pub citations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub run_id: Uuid,
    pub evaluated_at: String,
    pub corpus_fingerprint: String,
    pub total_cases: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub retrieval_at_1: f64,
    pub retrieval_at_3: f64,
    pub retrieval_at_5: f64,
    pub mean_reciprocal_rank: f64,
    pub p50_latency_ms: f64,
    pub p90_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub category_scores: BTreeMap<String, f64>,
    pub results: Vec<CaseResult>,
}

pub struct EvalRunner<'a> {
    registry: &'a OpRegistry,
    show_progress: bool,
}

impl<'a> EvalRunner<'a> {
    pub fn new(registry: &'a OpRegistry) -> Self {
        Self {
            registry,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run every case through the `search` operation and aggregate
    /// keyword coverage, retrieval ranks, and latency percentiles.
    pub fn run(&self, cases: &[EvalCase]) -> Result<EvalSummary> {
        let bar = if self.show_progress {
            create_progress_bar(cases.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let mut results = Vec::with_capacity(cases.len());
        for case in cases {
            bar.set_message(case.id.clone());
            results.push(self.run_case(case));
            bar.inc(1);
        }
        bar.finish_with_message("done");

        Ok(self.summarize(results))
    }

    fn run_case(&self, case: &EvalCase) -> CaseResult {
        debug!("Evaluating case '{}': {}", case.id, case.query);

        let started = Instant::now();
        let response = self
            .registry
            .dispatch("search", OpArgs::query(&case.query));
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let (answer_text, citations, error) = match response {
            Ok(value) => {
                let text = value["answer"]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                let citations = value["results"]
                    .as_array()
                    .map(|rows| {
                        rows.iter()
                            .filter_map(|r| r["citation"].as_str())
                            .map(|c| c.to_string())
                            .collect()
                    })
                    .unwrap_or_default();
                (text, citations, None)
            }
            Err(err) => (String::new(), Vec::new(), Some(err.to_string())),
        };

        let (score, found_keywords) = keyword_score(&answer_text, &case.expected_keywords);
        let missing_keywords = case
            .expected_keywords
            .iter()
            .filter(|k| !found_keywords.contains(k))
            .cloned()
            .collect();

        let rank = citations
            .iter()
            .position(|c| case.expected_citations.contains(c))
            .map(|i| i + 1);

        CaseResult {
            id: case.id.clone(),
            query: case.query.clone(),
            category: case.category.clone(),
            score,
            passed: error.is_none() && score >= case.min_score,
            found_keywords,
            missing_keywords,
            rank,
            latency_ms,
            citations,
            error,
        }
    }

    fn summarize(&self, results: Vec<CaseResult>) -> EvalSummary {
        let total_cases = results.len();
        let passed = results.iter().filter(|r| r.passed).count();

        let ranked: Vec<Option<usize>> = results.iter().map(|r| r.rank).collect();
        let retrieval_at = |k: usize| -> f64 {
            if total_cases == 0 {
                return 0.0;
            }
            let hits = ranked.iter().filter(|r| matches!(r, Some(n) if *n <= k)).count();
            hits as f64 / total_cases as f64
        };

        let mean_reciprocal_rank = if total_cases == 0 {
            0.0
        } else {
            ranked
                .iter()
                .map(|r| r.map(|n| 1.0 / n as f64).unwrap_or(0.0))
                .sum::<f64>()
                / total_cases as f64
        };

        let latencies: Vec<f64> = results.iter().map(|r| r.latency_ms).collect();

        let mut category_totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for result in &results {
            let slot = category_totals
                .entry(result.category.clone())
                .or_insert((0.0, 0));
            slot.0 += result.score;
            slot.1 += 1;
        }
        let category_scores = category_totals
            .into_iter()
            .map(|(category, (sum, count))| (category, sum / count as f64))
            .collect();

        EvalSummary {
            run_id: Uuid::new_v4(),
            evaluated_at: Utc::now().to_rfc3339(),
            corpus_fingerprint: self.registry.context().corpus().fingerprint().to_string(),
            total_cases,
            passed,
            failed: total_cases - passed,
            pass_rate: if total_cases == 0 {
                0.0
            } else {
                passed as f64 / total_cases as f64
            },
            retrieval_at_1: retrieval_at(1),
            retrieval_at_3: retrieval_at(3),
            retrieval_at_5: retrieval_at(5),
            mean_reciprocal_rank,
            p50_latency_ms: percentile(&latencies, 50.0),
            p90_latency_ms: percentile(&latencies, 90.0),
            p99_latency_ms: percentile(&latencies, 99.0),
            category_scores,
            results,
        }
    }
}

/// Write the summary to `<dir>/eval_results_<run_id>.json`.
pub fn save_results(summary: &EvalSummary, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("eval_results_{}.json", summary.run_id));
    std::fs::write(&path, serde_json::to_string_pretty(summary)?)?;
    info!("Evaluation results saved to {}", path.display());
    Ok(path)
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Failed to create progress bar template")
            .progress_chars("█▓▒░"),
    );
    bar
}
