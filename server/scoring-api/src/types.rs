//! Request/response types for the scoring API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CreatedSession {
  pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UploadFile {
  pub name: String,
  pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AddFilesPayload {
  pub files: Vec<UploadFile>,
}

/// One override edit; the JSON key names the command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideCommand {
  SetPoints {
    guide_code: String,
    index: usize,
    points: f64,
  },
  SetShouldCount {
    guide_code: String,
    index: usize,
    should_count: bool,
  },
  SetAll {
    guide_code: String,
    should_count: bool,
  },
}

/// `?tier=<points>` limits a copy to one complexity tier.
#[derive(Debug, Default, Deserialize)]
pub struct CopyQuery {
  pub tier: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SprintPayload {
  pub enabled: bool,
}

/// Shell command for the confirmed config.
#[derive(Debug, Serialize)]
pub struct GitConfigResponse {
  pub command: String,
}
