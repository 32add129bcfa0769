//! Structured error types for the scoring engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("read {file}: {source}")]
  Read {
    file: String,
    #[source]
    source: std::io::Error,
  },

  #[error("unknown category: {0}")]
  UnknownCategory(String),

  #[error("nothing selected")]
  NothingSelected,

  #[error("no message confirmed")]
  NoMessage,

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn read(file: impl Into<String>, source: std::io::Error) -> Self {
    Self::Read {
      file: file.into(),
      source,
    }
  }
}
