//! In-memory session registry shared by all handlers.

use std::collections::HashMap;

use scoring_engine::Session;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Default)]
pub struct AppState {
  sessions: RwLock<HashMap<Uuid, Session>>,
}

impl AppState {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn create(&self) -> Uuid {
    let id = Uuid::new_v4();
    self.sessions.write().await.insert(id, Session::with_defaults());
    id
  }

  /// Drop a session and everything it holds. Returns whether it existed.
  pub async fn remove(&self, id: Uuid) -> bool {
    self.sessions.write().await.remove(&id).is_some()
  }

  pub async fn session_count(&self) -> usize {
    self.sessions.read().await.len()
  }

  /// Run `f` against a session under the read lock.
  pub async fn read<T, F>(&self, id: Uuid, f: F) -> Result<T, ApiError>
  where
    F: FnOnce(&Session) -> Result<T, ApiError>,
  {
    let sessions = self.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    f(session)
  }

  /// Run `f` against a session under the write lock.
  pub async fn write<T, F>(&self, id: Uuid, f: F) -> Result<T, ApiError>
  where
    F: FnOnce(&mut Session) -> Result<T, ApiError>,
  {
    let mut sessions = self.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
    f(session)
  }
}
