use crate::api::errors::{api_error, ApiError};
use crate::api::views::{render_page, DraftView, Notice, Page};
use crate::api::AppState;
use crate::db::{Client, ClientRepository, Database};
use crate::errors::Error;
use crate::export::resolve_download;
use crate::llm::Draft;
use crate::report::build_report_messages;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{
    extract::{Extension, Form, Path},
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Fields posted by the report form
#[derive(Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub input_text: String,
}

/// Represents the request payload for creating a client record
#[derive(Deserialize)]
pub struct NewClientRequest {
    pub name: String,
}

fn load_clients(database: &Database) -> Result<Vec<Client>, Error> {
    let mut conn = database.get_conn()?;
    ClientRepository::new(&mut conn).list_clients()
}

fn draft_view(draft: Draft) -> DraftView {
    let Draft {
        temperature,
        result,
    } = draft;
    DraftView {
        key: temperature.to_string(),
        outcome: result.map(|m| m.content).map_err(|e| {
            format!(
                "Verslag bij temperatuur {} kon niet worden gemaakt. {}",
                temperature,
                e.user_message()
            )
        }),
    }
}

/// Renders the empty report form
#[axum::debug_handler]
pub async fn index(Extension(state): Extension<AppState>) -> Result<Html<String>, ApiError> {
    let clients = load_clients(&state.database)?;
    Ok(Html(render_page(&Page {
        clients: &clients,
        ..Default::default()
    })))
}

/// Generates one draft per configured temperature and renders them
///
/// Blank input is answered with a notice; the model is not called.
#[axum::debug_handler]
pub async fn generate(
    Extension(state): Extension<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, ApiError> {
    let clients = load_clients(&state.database)?;

    let mut notices = Vec::new();
    if form.client_name.trim().is_empty() {
        notices.push(Notice::Error("Kies eerst een cliënt.".to_string()));
    }
    let messages = match build_report_messages(&form.client_name, &form.input_text) {
        Ok(messages) if notices.is_empty() => Some(messages),
        Ok(_) => None,
        Err(_) => {
            notices.push(Notice::Error(
                "Vul in wat er in het verslag moet komen.".to_string(),
            ));
            None
        }
    };

    let drafts: Vec<DraftView> = match messages {
        Some(messages) => {
            info!(
                "Generating {} drafts for client {}",
                state.temperatures.len(),
                form.client_name.trim()
            );
            state
                .llm
                .generate_drafts(&messages, &state.temperatures)
                .await
                .into_iter()
                .map(draft_view)
                .collect()
        }
        None => Vec::new(),
    };

    Ok(Html(render_page(&Page {
        clients: &clients,
        selected_client: form.client_name.trim(),
        notes: &form.input_text,
        drafts: &drafts,
        notices: &notices,
    })))
}

/// Saves the draft posted for `temperature` and links to the document
#[axum::debug_handler]
pub async fn save_document(
    Path(temperature): Path<String>,
    Extension(state): Extension<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let clients = load_clients(&state.database)?;

    let content = fields
        .get(&format!("content_{}", temperature))
        .filter(|c| !c.trim().is_empty());

    let notice = match content {
        None => {
            warn!("Save requested for temperature {} without content", temperature);
            Notice::Error("Geen inhoud om op te slaan.".to_string())
        }
        Some(content) => {
            let path = state.exporter.save(content)?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Notice::Saved {
                href: format!("/documents/{}", filename),
                filename,
            }
        }
    };

    Ok(Html(render_page(&Page {
        clients: &clients,
        notices: &[notice],
        ..Default::default()
    })))
}

/// Serves a saved document as a download
#[axum::debug_handler]
pub async fn download_document(
    Path(filename): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    let path = resolve_download(&state.documents_dir, &filename)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(api_error(StatusCode::NOT_FOUND, "Document not found"));
        }
        Err(e) => return Err(Error::from(e).into()),
    };

    let headers = [
        (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// Lists client records
#[axum::debug_handler]
pub async fn list_clients(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(load_clients(&state.database)?))
}

/// Creates a client record, or returns the existing one with the same name
#[axum::debug_handler]
pub async fn add_client(
    Extension(state): Extension<AppState>,
    Json(payload): Json<NewClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let mut conn = state.database.get_conn()?;
    let client = ClientRepository::new(&mut conn).add_client(&payload.name)?;
    info!("Client record available: {}", client.name);
    Ok((StatusCode::CREATED, Json(client)))
}
