// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use resume_query::utils::logging::{format_fail, format_pass};
use resume_query::{
    aggregate_impact, builtin_cases, calculate_tenure_now, eval, Config, CorpusLoader, EvalRunner,
    OpArgs, OpContext, OpRegistry, OperationTimer, PiiScanner,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "resume_query")]
#[command(version = "0.1.0")]
#[command(about = "Keyword-scored resume retrieval with cited answers", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the corpus, reporting entry counts per category
    Validate,

    /// Search the resume with a free-text query
    Search {
        /// Search query text
        query: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Find where a skill or technology shows up
    Skills {
        skill: String,
    },

    /// Show the full record for one company
    Company {
        name: String,
    },

    /// Summarize quantified business impact with citations
    Metrics,

    /// Calculate total experience and career progression
    Tenure,

    /// Run the retrieval quality evaluation suite
    Eval {
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,

        #[arg(short, long, default_value = "./eval_results")]
        output: PathBuf,

        #[arg(long)]
        save: bool,
    },

    /// Scan files for phone numbers, SSNs, and credit card numbers
    RedactCheck {
        /// File or directory to scan (defaults to the configured corpus file)
        path: Option<PathBuf>,
    },

    /// Start MCP (Model Context Protocol) server for agentic tool integration
    Mcp {
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    resume_query::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Resume Query");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Validate => {
            cmd_validate(&config)?;
        }
        Commands::Search {
            query,
            category,
            limit,
        } => {
            cmd_search(&config, &query, category, limit)?;
        }
        Commands::Skills { skill } => {
            cmd_skill(&config, &skill)?;
        }
        Commands::Company { name } => {
            cmd_company(&config, &name)?;
        }
        Commands::Metrics => {
            cmd_metrics(&config)?;
        }
        Commands::Tenure => {
            cmd_tenure(&config)?;
        }
        Commands::Eval {
            cases,
            output,
            save,
        } => {
            cmd_eval(&config, cases, output, save)?;
        }
        Commands::RedactCheck { path } => {
            cmd_redact_check(&config, path)?;
        }
        Commands::Mcp { transport } => {
            cmd_mcp(&config, &transport).await?;
        }
    }

    Ok(())
}

fn build_registry(config: &Config) -> Result<OpRegistry> {
    let corpus = CorpusLoader::new()
        .load(&config.corpus.path)
        .context("Failed to load corpus")?;
    Ok(OpRegistry::new(OpContext::new(Arc::new(corpus), config)))
}

fn cmd_validate(config: &Config) -> Result<()> {
    info!("Validating corpus at {}", config.corpus.path.display());

    let corpus = CorpusLoader::new()
        .load(&config.corpus.path)
        .context("Corpus validation failed")?;

    println!("\nCorpus is valid: {} entries", corpus.len());
    for category in resume_query::Category::all() {
        let count = corpus.all(Some(category)).len();
        if count > 0 {
            println!("  {:<12} {}", category.to_string(), count);
        }
    }
    println!("  fingerprint  {}", &corpus.fingerprint()[..12]);

    Ok(())
}

fn cmd_search(
    config: &Config,
    query: &str,
    category: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    info!("Searching for: {}", query);

    let registry = build_registry(config)?;
    let operation = if category.is_some() {
        "search_category"
    } else {
        "search"
    };
    let response = registry.dispatch(
        operation,
        OpArgs {
            query: Some(query.to_string()),
            category,
            top_k: limit,
            ..Default::default()
        },
    )?;

    print_search_response(query, &response);
    Ok(())
}

fn cmd_skill(config: &Config, skill: &str) -> Result<()> {
    info!("Looking up skill: {}", skill);

    let registry = build_registry(config)?;
    let response = registry.dispatch("search_skill", OpArgs::query(skill))?;

    print_search_response(skill, &response);
    Ok(())
}

fn print_search_response(query: &str, response: &serde_json::Value) {
    let count = response["results_count"].as_u64().unwrap_or(0);

    if count == 0 {
        println!("\nNo results found for query: \"{}\"\n", query);
        println!("{}", response["answer"]["text"].as_str().unwrap_or(""));
        return;
    }

    println!("\nSearch Results for: \"{}\"\n", query);
    println!("{}", response["answer"]["text"].as_str().unwrap_or(""));
    println!("\n{}", "=".repeat(80));

    if let Some(rows) = response["results"].as_array() {
        for (idx, row) in rows.iter().enumerate() {
            println!(
                "\n{}. {} (Score: {:.1})",
                idx + 1,
                row["text"].as_str().unwrap_or("?"),
                row["score"].as_f64().unwrap_or(0.0)
            );
            println!("   Citation: {}", row["citation"].as_str().unwrap_or("?"));
            if let Some(matched) = row["matched"].as_array() {
                let terms: Vec<&str> = matched.iter().filter_map(|m| m.as_str()).collect();
                println!("   Matched: {}", terms.join(", "));
            }
        }
    }

    println!("\n{}", "=".repeat(80));
}

fn cmd_company(config: &Config, name: &str) -> Result<()> {
    let registry = build_registry(config)?;
    let response = registry.dispatch(
        "company_details",
        OpArgs {
            name: Some(name.to_string()),
            ..Default::default()
        },
    )?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn cmd_metrics(config: &Config) -> Result<()> {
    let corpus = CorpusLoader::new()
        .load(&config.corpus.path)
        .context("Failed to load corpus")?;

    let report = aggregate_impact(&corpus);
    if report.is_empty() {
        println!("\nNo quantified metrics found in the corpus");
        return Ok(());
    }

    println!("\n{}", report.format());
    Ok(())
}

fn cmd_tenure(config: &Config) -> Result<()> {
    let corpus = CorpusLoader::new()
        .load(&config.corpus.path)
        .context("Failed to load corpus")?;

    let report = calculate_tenure_now(&corpus).context("Tenure calculation failed")?;

    println!("\nTotal experience: {} years", report.total_years);
    println!("Roles held: {}", report.roles_held);
    println!("Organizations: {}", report.organizations);
    if let Some(current) = &report.current_role {
        println!(
            "Current role: {} at {} [{}]",
            current.title,
            current.organization.as_deref().unwrap_or("?"),
            current.citation
        );
    }
    println!("\nProgression:");
    for role in &report.progression {
        println!(
            "  {} - {} ({}) [{}]",
            role.duration,
            role.title,
            role.organization.as_deref().unwrap_or("?"),
            role.citation
        );
    }

    Ok(())
}

fn cmd_eval(
    config: &Config,
    cases_path: Option<PathBuf>,
    output: PathBuf,
    save: bool,
) -> Result<()> {
    info!("Running evaluation suite");
    let timer = OperationTimer::new("evaluation suite");

    let cases = match cases_path.or_else(|| config.eval.cases_path.clone()) {
        Some(path) => eval::load_cases(&path).context("Failed to load evaluation cases")?,
        None => builtin_cases(),
    };

    let registry = build_registry(config)?;
    let summary = EvalRunner::new(&registry)
        .with_progress(true)
        .run(&cases)?;

    println!("\nEvaluation Results ({} cases)\n", summary.total_cases);
    for result in &summary.results {
        let line = format!(
            "{:<24} {:.2} ({})",
            result.id, result.score, result.category
        );
        if result.passed {
            println!("  {}", format_pass(&line));
        } else {
            println!("  {}", format_fail(&line));
            if !result.missing_keywords.is_empty() {
                println!("      missing: {}", result.missing_keywords.join(", "));
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!(
        "Pass rate:      {:.0}% ({}/{})",
        summary.pass_rate * 100.0,
        summary.passed,
        summary.total_cases
    );
    for (category, average) in &summary.category_scores {
        println!("  {:<12} {:.2}", category, average);
    }
    println!(
        "Retrieval@1/3/5: {:.2} / {:.2} / {:.2}",
        summary.retrieval_at_1, summary.retrieval_at_3, summary.retrieval_at_5
    );
    println!("MRR:            {:.3}", summary.mean_reciprocal_rank);
    println!(
        "Latency p50/p90/p99: {:.2} / {:.2} / {:.2} ms",
        summary.p50_latency_ms, summary.p90_latency_ms, summary.p99_latency_ms
    );
    let elapsed = timer.finish_with_count(summary.total_cases);
    println!("Elapsed:        {:.2}s", elapsed.as_secs_f64());

    if save {
        let path = eval::save_results(&summary, &output)?;
        println!("Results saved to {}", path.display());
    }

    if summary.failed > 0 {
        error!("{} evaluation case(s) failed", summary.failed);
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_redact_check(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let target = path.unwrap_or_else(|| config.corpus.path.clone());
    info!("Scanning {} for PII", target.display());

    let scanner = PiiScanner::new(config.redaction.scan_extensions.clone());
    let findings = if target.is_dir() {
        scanner.scan_dir(&target)?
    } else {
        scanner.scan_file(&target)?
    };

    if findings.is_empty() {
        println!("{}", format_pass("No PII detected"));
        return Ok(());
    }

    println!("{}", format_fail(&format!("{} finding(s)", findings.len())));
    for finding in &findings {
        println!(
            "  [{:?}/{:?}] {} in {}",
            finding.kind, finding.severity, finding.matched, finding.origin
        );
    }
    std::process::exit(1);
}

async fn cmd_mcp(config: &Config, transport: &str) -> Result<()> {
    info!("Starting MCP server (transport: {})", transport);

    if transport != "stdio" {
        error!("Only stdio transport is currently supported");
        return Err(anyhow::anyhow!("Unsupported transport: {}", transport));
    }

    let registry = build_registry(config)?;
    resume_query::mcp::serve_stdio(Arc::new(registry))
        .await
        .context("MCP server terminated abnormally")?;

    Ok(())
}
