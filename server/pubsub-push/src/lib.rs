//! Pub/Sub push receiver for the Teams relay.
//!
//! HTTP service that accepts push-subscription envelopes, unwraps the base64
//! payload and hands it to `teams_relay::handle_message`. The response status
//! tells the broker whether to acknowledge or redeliver.

mod config;
mod error;
mod handlers;
mod state;
mod types;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use teams_relay::Transport;

pub use config::ServerConfig;
pub use error::EnvelopeError;
pub use handlers::{health, push, status_for};
pub use state::AppState;
pub use types::{PushEnvelope, PushMessage};

pub fn router<T: Transport + 'static>(state: Arc<AppState<T>>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/push", post(push::<T>))
    .with_state(state)
}
