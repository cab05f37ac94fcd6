// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ResumeError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub retrieval: RetrievalConfig,
    pub eval: EvalConfig,
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub weight_title: f64,
    pub weight_highlight: f64,
    pub weight_body: f64,
    pub answer_char_budget: usize,
    pub max_bullets: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvalConfig {
    pub cases_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedactionConfig {
    pub scan_extensions: Vec<String>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RESUME_QUERY")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ResumeError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ResumeError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("data/resume.json"),
            },
            retrieval: RetrievalConfig {
                top_k: 5,
                weight_title: 3.0,
                weight_highlight: 2.0,
                weight_body: 1.0,
                answer_char_budget: 700,
                max_bullets: 6,
            },
            eval: EvalConfig {
                cases_path: None,
                output_dir: PathBuf::from("./eval_results"),
            },
            redaction: RedactionConfig {
                scan_extensions: vec![
                    "json".to_string(),
                    "md".to_string(),
                    "txt".to_string(),
                    "toml".to_string(),
                ],
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.retrieval.top_k == 0 {
            return Err(ResumeError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.weight_title <= 0.0
            || self.retrieval.weight_highlight <= 0.0
            || self.retrieval.weight_body <= 0.0
        {
            return Err(ResumeError::Config(
                "retrieval weights must be positive".to_string(),
            ));
        }

        if self.retrieval.answer_char_budget == 0 {
            return Err(ResumeError::Config(
                "answer_char_budget must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.max_bullets == 0 {
            return Err(ResumeError::Config(
                "max_bullets must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
