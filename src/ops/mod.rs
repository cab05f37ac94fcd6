// file: src/ops/mod.rs
// description: explicit operation dispatch table for the transport layer
// reference: built once at startup; no global registration

use crate::analysis;
use crate::config::Config;
use crate::error::{ResumeError, Result};
use crate::models::{Category, ScoredResult};
use crate::retrieval::{AnswerFormatter, RetrievalEngine};
use crate::store::Corpus;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Plain structured arguments accepted by every operation; each handler
/// validates the subset it needs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OpArgs {
    pub query: Option<String>,
    pub category: Option<String>,
    pub top_k: Option<usize>,
    pub name: Option<String>,
}

impl OpArgs {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    fn require_query(&self) -> Result<&str> {
        match self.query.as_deref() {
            Some(q) => Ok(q),
            None => Err(ResumeError::InvalidQuery(
                "missing 'query' argument".to_string(),
            )),
        }
    }
}

/// Shared read-only state behind every operation. The corpus is immutable
/// after load, so concurrent callers need no locking.
pub struct OpContext {
    corpus: Arc<Corpus>,
    engine: RetrievalEngine,
    formatter: AnswerFormatter,
}

impl OpContext {
    pub fn new(corpus: Arc<Corpus>, config: &Config) -> Self {
        let engine = RetrievalEngine::new(Arc::clone(&corpus), &config.retrieval);
        let formatter = AnswerFormatter::from_config(&config.retrieval);
        Self {
            corpus,
            engine,
            formatter,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn engine(&self) -> &RetrievalEngine {
        &self.engine
    }
}

type OpHandler = fn(&OpContext, OpArgs) -> Result<Value>;

/// Mapping from operation name to handler, built once and handed to the
/// transport layer.
pub struct OpRegistry {
    ctx: OpContext,
    handlers: BTreeMap<&'static str, OpHandler>,
}

impl OpRegistry {
    pub fn new(ctx: OpContext) -> Self {
        let mut handlers: BTreeMap<&'static str, OpHandler> = BTreeMap::new();
        handlers.insert("search", op_search);
        handlers.insert("search_category", op_search_category);
        handlers.insert("search_skill", op_search_skill);
        handlers.insert("company_details", op_company_details);
        handlers.insert("metrics_impact", op_metrics_impact);
        handlers.insert("tenure", op_tenure);

        Self { ctx, handlers }
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }

    pub fn context(&self) -> &OpContext {
        &self.ctx
    }

    pub fn dispatch(&self, operation: &str, args: OpArgs) -> Result<Value> {
        debug!("Dispatching operation '{}'", operation);
        let handler = self
            .handlers
            .get(operation)
            .ok_or_else(|| ResumeError::NotFound(format!("operation: {operation}")))?;
        handler(&self.ctx, args)
    }
}

fn render_results(ctx: &OpContext, results: &[ScoredResult]) -> Result<Value> {
    let answer = ctx.formatter.format(results, &ctx.corpus)?;

    let rows: Vec<Value> = results
        .iter()
        .map(|r| {
            json!({
                "text": r.title,
                "citation": r.citation,
                "score": r.score,
                "matched": r.matched,
            })
        })
        .collect();

    Ok(json!({
        "answer": answer,
        "results": rows,
        "results_count": rows.len(),
    }))
}

fn op_search(ctx: &OpContext, args: OpArgs) -> Result<Value> {
    let query = args.require_query()?;
    let results = ctx.engine.search(query, args.top_k)?;
    render_results(ctx, &results)
}

fn op_search_category(ctx: &OpContext, args: OpArgs) -> Result<Value> {
    let query = args.require_query()?;
    let category = match args.category.as_deref() {
        Some(raw) => Category::parse(raw)?,
        None => {
            return Err(ResumeError::InvalidQuery(
                "missing 'category' argument".to_string(),
            ));
        }
    };

    let results = ctx.engine.search_in_category(query, category, args.top_k)?;
    render_results(ctx, &results)
}

/// Skill lookup spans both the skills inventory and experience entries, the
/// two places a skill leaves evidence.
fn op_search_skill(ctx: &OpContext, args: OpArgs) -> Result<Value> {
    let query = args.require_query()?;
    let top_k = args.top_k;

    let mut results = ctx
        .engine
        .search_in_category(query, Category::Skills, top_k)?;
    results.extend(ctx.engine.search_in_category(query, Category::Experience, top_k)?);
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).expect("scores are finite"));

    render_results(ctx, &results)
}

fn op_company_details(ctx: &OpContext, args: OpArgs) -> Result<Value> {
    let name = match args.name.as_deref().or(args.query.as_deref()) {
        Some(name) if !name.trim().is_empty() => name.trim().to_lowercase(),
        _ => {
            return Err(ResumeError::InvalidQuery(
                "missing 'name' argument".to_string(),
            ));
        }
    };

    let entry = ctx
        .corpus
        .all(Some(Category::Experience))
        .into_iter()
        .find(|entry| {
            entry
                .organization
                .as_deref()
                .is_some_and(|org| org.to_lowercase().contains(&name))
                || entry.id.to_lowercase().contains(&name)
        })
        .ok_or_else(|| ResumeError::NotFound(format!("organization: {name}")))?;

    Ok(json!({
        "citation": entry.id,
        "title": entry.title,
        "organization": entry.organization,
        "duration": entry.date_range.map(|r| r.to_string()),
        "body": entry.body,
        "highlights": entry.highlights,
        "metrics": entry.metrics,
    }))
}

fn op_metrics_impact(ctx: &OpContext, _args: OpArgs) -> Result<Value> {
    let report = analysis::aggregate_impact(&ctx.corpus);
    Ok(serde_json::to_value(report)?)
}

fn op_tenure(ctx: &OpContext, _args: OpArgs) -> Result<Value> {
    let report = analysis::calculate_tenure_now(&ctx.corpus)?;
    Ok(serde_json::to_value(report)?)
}
