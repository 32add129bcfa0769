//! Commit Scoring API
//!
//! HTTP service over in-memory scoring sessions. Each session owns its
//! selected files, per-line overrides, sprint toggles and git-command config.
//! Bind to 127.0.0.1 by default (internal only).

mod config;
mod error;
mod handlers;
mod state;
mod types;

use std::sync::Arc;

use axum::{
  routing::{delete, get, post, put},
  Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use handlers::*;
pub use state::AppState;
pub use types::*;

/// All routes over shared state.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/sessions", post(create_session))
    .route("/sessions/:id", delete(delete_session))
    .route("/sessions/:id/files", post(add_files).delete(clear_files))
    .route("/sessions/:id/files/:name", delete(remove_file))
    .route("/sessions/:id/overrides", put(update_overrides))
    .route("/sessions/:id/sprints/:n", put(set_sprint))
    .route("/sessions/:id/git-config", put(confirm_git_config))
    .route("/sessions/:id/groups/:code/apply-message", post(apply_message))
    .route("/sessions/:id/groups/:code/overrides", delete(reset_overrides))
    .route("/sessions/:id/groups/:code/copy", get(copy_group))
    .route("/sessions/:id/report", get(report))
    .route("/sessions/:id/export", get(export))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
