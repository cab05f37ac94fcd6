// file: src/mcp/server.rs
// description: MCP server exposing the resume query operations as tools
// reference: https://docs.rs/rmcp

use crate::error::ResumeError;
use crate::ops::{OpArgs, OpRegistry};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Free-text query over the resume corpus
    pub query: String,
    /// Maximum number of ranked results (default 5)
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CategorySearchRequest {
    /// Free-text query over the resume corpus
    pub query: String,
    /// Category to restrict the search to: summary, experience, skills, education, or metrics
    pub category: String,
    /// Maximum number of ranked results (default 5)
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SkillRequest {
    /// Skill or technology to look for, e.g. "SQL" or "prompt engineering"
    pub skill: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompanyRequest {
    /// Company name, matched case-insensitively
    pub company: String,
}

#[derive(Clone)]
pub struct ResumeQueryServer {
    registry: Arc<OpRegistry>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ResumeQueryServer {
    pub fn new(registry: Arc<OpRegistry>) -> Self {
        Self {
            registry,
            tool_router: Self::tool_router(),
        }
    }

    fn call(&self, operation: &str, args: OpArgs) -> std::result::Result<CallToolResult, McpError> {
        match self.registry.dispatch(operation, args) {
            Ok(value) => {
                let body = serde_json::to_string_pretty(&value)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(body)]))
            }
            Err(err @ (ResumeError::InvalidQuery(_) | ResumeError::NotFound(_))) => {
                Err(McpError::invalid_params(err.to_string(), None))
            }
            Err(err) => Err(McpError::internal_error(err.to_string(), None)),
        }
    }

    #[tool(
        description = "Search the resume with a free-text query. Returns a compact cited answer plus ranked results."
    )]
    async fn search_experience(
        &self,
        Parameters(req): Parameters<SearchRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("MCP: search_experience '{}'", req.query);
        self.call(
            "search",
            OpArgs {
                query: Some(req.query),
                top_k: req.top_k,
                ..Default::default()
            },
        )
    }

    #[tool(
        description = "Search the resume within a single category (summary, experience, skills, education, metrics)."
    )]
    async fn search_by_category(
        &self,
        Parameters(req): Parameters<CategorySearchRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!(
            "MCP: search_by_category '{}' in '{}'",
            req.query, req.category
        );
        self.call(
            "search_category",
            OpArgs {
                query: Some(req.query),
                category: Some(req.category),
                top_k: req.top_k,
                ..Default::default()
            },
        )
    }

    #[tool(
        description = "Find where a specific skill or technology shows up, across both the skills and experience sections."
    )]
    async fn search_by_skill(
        &self,
        Parameters(req): Parameters<SkillRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("MCP: search_by_skill '{}'", req.skill);
        self.call("search_skill", OpArgs::query(req.skill))
    }

    #[tool(
        description = "Get the full record for one company: role, duration, highlights, and metrics."
    )]
    async fn get_company_details(
        &self,
        Parameters(req): Parameters<CompanyRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("MCP: get_company_details '{}'", req.company);
        self.call(
            "company_details",
            OpArgs {
                name: Some(req.company),
                ..Default::default()
            },
        )
    }

    #[tool(
        description = "Summarize quantified business impact: dollar figures, percentages, and counts with citations."
    )]
    async fn get_metrics_and_impact(&self) -> std::result::Result<CallToolResult, McpError> {
        info!("MCP: get_metrics_and_impact");
        self.call("metrics_impact", OpArgs::default())
    }

    #[tool(
        description = "Calculate total years of professional experience, role count, and career progression."
    )]
    async fn calculate_total_experience(&self) -> std::result::Result<CallToolResult, McpError> {
        info!("MCP: calculate_total_experience");
        self.call("tenure", OpArgs::default())
    }
}

#[tool_handler]
impl ServerHandler for ResumeQueryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Query a structured resume corpus. Every answer bullet carries a [entry_id] \
                 citation that resolves to a corpus entry."
                    .to_string(),
            ),
        }
    }
}

/// Serve the tool surface over stdio until the client disconnects.
pub async fn serve_stdio(registry: Arc<OpRegistry>) -> crate::error::Result<()> {
    let server = ResumeQueryServer::new(registry);
    info!("MCP server ready, serving over stdio");

    let service = server
        .serve(stdio())
        .await
        .map_err(|e| ResumeError::Transport(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| ResumeError::Transport(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ops::OpContext;
    use crate::store::CorpusLoader;

    fn server() -> ResumeQueryServer {
        let corpus = CorpusLoader::new()
            .load_from_str(include_str!("../../data/resume.json"))
            .unwrap();
        let config = Config::default_config();
        let registry = OpRegistry::new(OpContext::new(Arc::new(corpus), &config));
        ResumeQueryServer::new(Arc::new(registry))
    }

    #[test]
    fn test_exposes_six_tools() {
        let server = server();
        let tools = server.tool_router.list_all();
        assert_eq!(tools.len(), 6);

        let names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
        assert!(names.contains(&"search_experience".to_string()));
        assert!(names.contains(&"calculate_total_experience".to_string()));
    }

    #[tokio::test]
    async fn test_search_tool_returns_cited_answer() {
        let server = server();
        let result = server
            .search_experience(Parameters(SearchRequest {
                query: "underwriting model accuracy".to_string(),
                top_k: None,
            }))
            .await
            .unwrap();

        let text = result.content.as_ref().unwrap()[0].as_text().unwrap();
        assert!(text.text.contains("[experience_harborline]"));
    }

    #[tokio::test]
    async fn test_invalid_query_maps_to_invalid_params() {
        let server = server();
        let err = server
            .search_experience(Parameters(SearchRequest {
                query: "the and of".to_string(),
                top_k: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
