// file: src/mcp/mod.rs
// description: MCP (Model Context Protocol) tool surface over the operation registry
// reference: https://docs.rs/rmcp

pub mod server;

pub use server::{serve_stdio, ResumeQueryServer};
