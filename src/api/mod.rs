/// API error types and handling
pub mod errors;
/// HTTP handlers for the report form, documents and client records
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
/// HTML rendering
pub mod views;

use crate::db::Database;
use crate::export::DocumentExporter;
use crate::llm::LlmClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<LlmClient>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub documents_dir: PathBuf,
    pub database: Database,
    pub temperatures: Vec<f32>,
}
