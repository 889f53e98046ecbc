//! API routes configuration module

use crate::api::handlers::{
    add_client, download_document, generate, index, list_clients, save_document,
};
use crate::api::AppState;
use axum::{
    routing::{get, post},
    Extension, Router,
};

/// Creates and configures the router with all routes
///
/// # Arguments
/// * `state` - Shared state handed to every handler
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(generate))
        .route("/save/:temperature", post(save_document))
        .route("/documents/:filename", get(download_document))
        .route("/clients", get(list_clients).post(add_client))
        .layer(Extension(state))
}
