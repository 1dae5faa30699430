//! Push subscription request types.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::error::EnvelopeError;

/// Body of a push request. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
  pub message: PushMessage,
  #[serde(default)]
  pub subscription: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
  /// Standard base64 of the notification JSON.
  #[serde(default)]
  pub data: String,
  #[serde(default)]
  pub message_id: Option<String>,
  #[serde(default)]
  pub attributes: HashMap<String, String>,
}

impl PushMessage {
  pub fn decode_data(&self) -> Result<Vec<u8>, EnvelopeError> {
    Ok(STANDARD.decode(self.data.trim())?)
  }
}
