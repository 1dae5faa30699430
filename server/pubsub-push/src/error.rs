//! Envelope-level errors (before the relay sees the payload).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvelopeError {
  #[error("message.data is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),
}
