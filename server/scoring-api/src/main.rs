//! Binary entrypoint for the scoring API.

use std::net::SocketAddr;
use std::sync::Arc;

use scoring_api::{AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .init();

  let config = ServerConfig::from_env()?;
  let state = Arc::new(AppState::new());
  let app = scoring_api::router(state);

  let addr = SocketAddr::from((config.bind_addr, config.port));
  info!(%addr, "scoring-api listening");

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
