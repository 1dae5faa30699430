//! HTTP handlers for the push receiver.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use teams_relay::{handle_message, RelayError, Transport};
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::types::PushEnvelope;

pub async fn health() -> &'static str {
  "ok"
}

/// Relay one pushed message. 204 acknowledges it; any other status leaves
/// redelivery to the subscription.
pub async fn push<T: Transport>(
  State(state): State<Arc<AppState<T>>>,
  Json(envelope): Json<PushEnvelope>,
) -> StatusCode {
  let message_id = envelope.message.message_id.as_deref().unwrap_or("-");

  let payload = match envelope.message.decode_data() {
    Ok(p) => p,
    Err(e) => {
      warn!(message_id, error = %e, "push: bad envelope");
      return StatusCode::BAD_REQUEST;
    }
  };

  match handle_message(&state.dispatcher, &payload).await {
    Ok(()) => {
      info!(message_id, "push: delivered");
      StatusCode::NO_CONTENT
    }
    Err(e) => {
      error!(message_id, error = %e, "push: relay failed");
      status_for(&e)
    }
  }
}

/// Map a relay failure to the status the broker sees.
pub fn status_for(err: &RelayError) -> StatusCode {
  match err {
    RelayError::Decode(_) => StatusCode::BAD_REQUEST,
    RelayError::Delivery(_) => StatusCode::BAD_GATEWAY,
    RelayError::Config(_) | RelayError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}
