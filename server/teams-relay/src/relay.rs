//! One invocation: payload bytes -> decode -> map -> dispatch.

use tracing::info;

use crate::card;
use crate::dispatch::{Dispatcher, Transport};
use crate::error::RelayError;
use crate::types::Notification;

pub fn decode(payload: &[u8]) -> Result<Notification, RelayError> {
  serde_json::from_slice(payload).map_err(RelayError::Decode)
}

/// Relay a single message payload. Any error ends the invocation; the caller
/// decides whether the message is redelivered.
pub async fn handle_message<T: Transport>(
  dispatcher: &Dispatcher<T>,
  payload: &[u8],
) -> Result<(), RelayError> {
  info!(payload = %String::from_utf8_lossy(payload), "received message");

  let notification = decode(payload)?;
  let card = card::map(&notification);

  info!(
    incident_id = %notification.incident.incident_id,
    state = %notification.incident.state,
    policy = %notification.incident.policy_name,
    endpoint = %dispatcher.endpoint(),
    "relaying incident"
  );

  dispatcher.dispatch(&card).await
}
