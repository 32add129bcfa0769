//! Engine errors mapped onto HTTP status codes.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use scoring_engine::EngineError;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unknown session: {0}")]
  SessionNotFound(Uuid),

  #[error("file not selected: {0}")]
  FileNotFound(String),

  #[error(transparent)]
  Engine(#[from] EngineError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::SessionNotFound(_) | ApiError::FileNotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Engine(e) => match e {
        EngineError::Validation { .. } | EngineError::Json(_) => StatusCode::BAD_REQUEST,
        EngineError::UnknownCategory(_) => StatusCode::NOT_FOUND,
        EngineError::NothingSelected | EngineError::NoMessage => StatusCode::CONFLICT,
        EngineError::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
