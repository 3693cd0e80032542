//! Error types for the RAG pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Document extension is neither `.pdf` nor `.docx`
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// Malformed or corrupt document
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Embedding model failure or contract violation
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Similarity index misuse (dimension mismatch)
    #[error("Similarity index error: {0}")]
    Index(String),

    /// The inference request could not complete
    #[error("Network failure: {0}")]
    Network(String),

    /// Inference API answered with a non-success status
    #[error("Inference API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Inference API answered with an unexpected body shape
    #[error("Unexpected inference response: {0}")]
    ResponseFormat(String),

    /// Missing or rejected credential
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Malformed HTTP request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-readable kind, used in logs and HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Extraction { .. } => "extraction_error",
            Error::Embedding(_) => "embedding_error",
            Error::Index(_) => "index_error",
            Error::Network(_) => "network_error",
            Error::Api { .. } => "api_error",
            Error::ResponseFormat(_) => "response_format_error",
            Error::Auth(_) => "auth_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::Config(_) => "config_error",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::UnsupportedFormat(_)
            | Error::Extraction { .. }
            | Error::InvalidRequest(_)
            | Error::Config(_) => StatusCode::BAD_REQUEST,
            Error::Auth(_) => StatusCode::UNAUTHORIZED,
            Error::Network(_) | Error::Api { .. } | Error::ResponseFormat(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Embedding(_) | Error::Index(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
