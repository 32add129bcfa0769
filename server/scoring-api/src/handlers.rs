//! HTTP handlers for scoring sessions.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::{header, StatusCode},
  response::IntoResponse,
  Json,
};
use git_command::{build_command, GitCommandConfig};
use scoring_engine::{Report, SelectedFile};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::*;

pub async fn health() -> &'static str {
  "ok"
}

pub async fn create_session(State(state): State<Arc<AppState>>) -> (StatusCode, Json<CreatedSession>) {
  let id = state.create().await;
  info!(%id, "session created");
  (StatusCode::CREATED, Json(CreatedSession { id }))
}

pub async fn delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  if !state.remove(id).await {
    return Err(ApiError::SessionNotFound(id));
  }
  info!(%id, "session deleted");
  Ok(StatusCode::NO_CONTENT)
}

pub async fn add_files(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(payload): Json<AddFilesPayload>,
) -> Result<Json<Report>, ApiError> {
  let batch = payload
    .files
    .into_iter()
    .map(|f| SelectedFile::from_text(f.name, f.content))
    .collect();
  state
    .write(id, |s| {
      s.add_files(batch);
      Ok(Json(s.report()))
    })
    .await
}

pub async fn remove_file(
  State(state): State<Arc<AppState>>,
  Path((id, name)): Path<(Uuid, String)>,
) -> Result<Json<Report>, ApiError> {
  state
    .write(id, |s| {
      if !s.remove_file(&name) {
        return Err(ApiError::FileNotFound(name));
      }
      Ok(Json(s.report()))
    })
    .await
}

pub async fn clear_files(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Report>, ApiError> {
  state
    .write(id, |s| {
      s.clear_files();
      Ok(Json(s.report()))
    })
    .await
}

pub async fn update_overrides(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(command): Json<OverrideCommand>,
) -> Result<Json<Report>, ApiError> {
  state
    .write(id, |s| {
      match command {
        OverrideCommand::SetPoints {
          guide_code,
          index,
          points,
        } => s.set_points(&guide_code, index, points)?,
        OverrideCommand::SetShouldCount {
          guide_code,
          index,
          should_count,
        } => s.set_should_count(&guide_code, index, should_count)?,
        OverrideCommand::SetAll {
          guide_code,
          should_count,
        } => s.set_all_should_count(&guide_code, should_count)?,
      }
      Ok(Json(s.report()))
    })
    .await
}

/// Drop a category's overrides, which also clears its stale flag.
pub async fn reset_overrides(
  State(state): State<Arc<AppState>>,
  Path((id, code)): Path<(Uuid, String)>,
) -> Result<Json<Report>, ApiError> {
  state
    .write(id, |s| {
      s.reset_overrides(&code);
      Ok(Json(s.report()))
    })
    .await
}

pub async fn set_sprint(
  State(state): State<Arc<AppState>>,
  Path((id, sprint)): Path<(Uuid, u8)>,
  Json(payload): Json<SprintPayload>,
) -> Result<Json<Report>, ApiError> {
  state
    .write(id, |s| {
      s.set_sprint(sprint, payload.enabled)?;
      Ok(Json(s.report()))
    })
    .await
}

pub async fn confirm_git_config(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(config): Json<GitCommandConfig>,
) -> Result<Json<GitConfigResponse>, ApiError> {
  let command = build_command(&config);
  state
    .write(id, |s| {
      s.confirm_git_config(config)?;
      Ok(Json(GitConfigResponse { command }))
    })
    .await
}

pub async fn apply_message(
  State(state): State<Arc<AppState>>,
  Path((id, code)): Path<(Uuid, String)>,
) -> Result<Json<Report>, ApiError> {
  state
    .write(id, |s| {
      s.apply_message_to_group(&code)?;
      Ok(Json(s.report()))
    })
    .await
}

pub async fn copy_group(
  State(state): State<Arc<AppState>>,
  Path((id, code)): Path<(Uuid, String)>,
  Query(query): Query<CopyQuery>,
) -> Result<String, ApiError> {
  state
    .read(id, |s| match query.tier {
      None => Ok(s.copy_group(&code)?),
      Some(points) => Ok(s.copy_subgroup(&code, points)?),
    })
    .await
}

pub async fn report(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Report>, ApiError> {
  state.read(id, |s| Ok(Json(s.report()))).await
}

pub async fn export(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let document = state.read(id, |s| Ok(s.export_document()?)).await?;
  let disposition = format!("attachment; filename=\"{}\"", document.file_name);
  Ok((
    [
      (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    document.render(),
  ))
}
