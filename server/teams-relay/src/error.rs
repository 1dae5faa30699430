//! Structured error types for the relay.

use thiserror::Error;

/// Everything that can end an invocation early.
#[derive(Debug, Error)]
pub enum RelayError {
  #[error("config: {0}")]
  Config(#[from] ConfigError),

  #[error("decode: {0}")]
  Decode(#[source] serde_json::Error),

  #[error("serialize: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("delivery: {0}")]
  Delivery(#[from] DeliveryError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("`{0}` is not set in the environment")]
  Missing(String),

  #[error("invalid {field}: {reason}")]
  Invalid { field: String, reason: String },

  #[error("http client: {0}")]
  HttpClient(String),
}

impl ConfigError {
  pub fn missing(field: &str) -> Self {
    Self::Missing(field.to_string())
  }

  pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
    Self::Invalid {
      field: field.to_string(),
      reason: reason.into(),
    }
  }
}

/// The webhook did not accept the card.
#[derive(Debug, Error)]
pub enum DeliveryError {
  #[error("transport: {0}")]
  Transport(#[from] TransportError),

  /// Non-2xx response. `payload` is the exact body that was sent.
  #[error("unexpected status code {status}")]
  Status { status: u16, payload: Vec<u8> },
}

impl DeliveryError {
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Transport(_) => None,
    }
  }

  pub fn payload(&self) -> Option<&[u8]> {
    match self {
      Self::Status { payload, .. } => Some(payload),
      Self::Transport(_) => None,
    }
  }
}

/// The request never produced an HTTP status (DNS, refused, timeout, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
  pub message: String,
  pub timed_out: bool,
}

impl TransportError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      timed_out: false,
    }
  }

  pub fn timeout(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      timed_out: true,
    }
  }
}

impl From<reqwest::Error> for TransportError {
  fn from(err: reqwest::Error) -> Self {
    // reqwest's top-level message is generic; the cause is further down.
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
      message.push_str(": ");
      message.push_str(&cause.to_string());
      source = cause.source();
    }
    Self {
      message,
      timed_out: err.is_timeout(),
    }
  }
}
