//! API routes for the RAG server

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AskResponse, Document};

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new().route(
        "/ask",
        post(ask).layer(DefaultBodyLimit::max(max_upload_size)),
    )
}

/// POST /api/ask - Answer a question about an uploaded document
///
/// Multipart fields: `file` (with a filename) and `question`.
pub async fn ask(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AskResponse>> {
    let mut document: Option<Document> = None;
    let mut question: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| Error::InvalidRequest("field 'file' has no filename".into()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidRequest(format!("Failed to read file: {}", e)))?;
                document = Some(Document::new(filename, data.to_vec()));
            }
            "question" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::InvalidRequest(format!("Failed to read question: {}", e)))?;
                question = Some(text);
            }
            other => {
                tracing::debug!("Ignoring multipart field: {}", other);
            }
        }
    }

    let document =
        document.ok_or_else(|| Error::InvalidRequest("missing field 'file'".into()))?;
    let question =
        question.ok_or_else(|| Error::InvalidRequest("missing field 'question'".into()))?;

    tracing::info!(
        "Processing file: {} ({}, {} bytes)",
        document.filename,
        document.file_type.display_name(),
        document.size()
    );

    let response = state
        .pipeline()
        .ask(&document.filename, &document.data, &question)
        .await;
    Ok(Json(response))
}
