use std::any::Any;

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::ErrorDetail;
use crate::pdf::ExtractError;

pub const MISSING_FIELDS_MESSAGE: &str = "Fichier PDF et titre de poste requis";
pub const INVALID_FILE_MESSAGE: &str = "Fichier invalide (PDF requis)";
pub const EMPTY_DOCUMENT_MESSAGE: &str = "Le fichier PDF est vide ou illisible.";
pub const SERVER_ERROR_MESSAGE: &str = "Erreur serveur";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("{}", INVALID_FILE_MESSAGE)]
    InvalidFile,

    #[error("{}", EMPTY_DOCUMENT_MESSAGE)]
    EmptyDocument,

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Upstream analysis failed: {}", .0.error)]
    Upstream(ErrorDetail),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingFields | AppError::InvalidFile | AppError::EmptyDocument => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Multipart(e) => {
                tracing::warn!("Multipart error: {e}");
                (e.status(), Json(json!({ "error": e.body_text() }))).into_response()
            }
            AppError::Upstream(detail) => (StatusCode::BAD_GATEWAY, Json(detail)).into_response(),
            AppError::Extraction(e) => {
                let err = anyhow::Error::new(e).context("Failed to extract text from PDF");
                server_error(&err.to_string(), &format!("{err:?}"))
            }
            AppError::Internal(e) => server_error(&e.to_string(), &format!("{e:?}")),
        }
    }
}

/// The 500 body: generic label, the error message and the full error chain.
pub fn server_error(message: &str, trace: &str) -> Response {
    tracing::error!("Internal error: {trace}");
    let body = Json(json!({
        "error": SERVER_ERROR_MESSAGE,
        "message": message,
        "trace": trace,
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

/// Text of a panic payload raised with a string message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
