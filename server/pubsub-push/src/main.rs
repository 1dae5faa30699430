//! Binary entrypoint for the Pub/Sub push receiver.

use std::io;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pubsub_push::{AppState, ServerConfig};
use teams_relay::{Dispatcher, WebhookConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  // Both configs are validated before the listener comes up.
  let server = ServerConfig::from_env()?;
  let webhook = WebhookConfig::from_env()?;
  let dispatcher = Dispatcher::from_config(webhook)?;
  let state = Arc::new(AppState::new(dispatcher));

  let app = pubsub_push::router(state).layer(TraceLayer::new_for_http());

  let addr = server.socket_addr();
  info!(%addr, "pubsub-push listening");

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
