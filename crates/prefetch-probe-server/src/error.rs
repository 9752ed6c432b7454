//! Server errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use prefetch_probe::ProbeError;

/// All errors that can occur in the probe server.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Probe(e) => e.code(),
            ServerError::Config(_) => "E_CONFIG",
            ServerError::Transport(_) => "E_TRANSPORT",
            ServerError::Io(_) => "E_IO",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Probe(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("probe request failed: {self}");
        } else {
            tracing::warn!("probe request rejected: {self}");
        }

        (
            status,
            Json(serde_json::json!({
                "error": {
                    "code": self.code(),
                    "message": self.to_string(),
                }
            })),
        )
            .into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
