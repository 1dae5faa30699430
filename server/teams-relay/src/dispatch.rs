//! Dispatcher: serialize a card and POST it once to the webhook.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::WebhookConfig;
use crate::error::{ConfigError, DeliveryError, RelayError, TransportError};
use crate::types::MessageCard;

/// The one network capability the dispatcher needs: POST bytes, get a status.
pub trait Transport: Send + Sync {
  fn send(
    &self,
    url: &Url,
    body: &[u8],
  ) -> impl Future<Output = Result<u16, TransportError>> + Send;
}

/// `reqwest`-backed transport. The client carries the request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: reqwest::Client,
}

impl HttpTransport {
  pub fn new(config: &WebhookConfig) -> Result<Self, ConfigError> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
    Ok(Self { client })
  }
}

impl Transport for HttpTransport {
  async fn send(&self, url: &Url, body: &[u8]) -> Result<u16, TransportError> {
    let response = self
      .client
      .post(url.clone())
      .header(CONTENT_TYPE, "application/json")
      .body(body.to_vec())
      .send()
      .await?;
    Ok(response.status().as_u16())
  }
}

/// Delivers cards to a single, pre-validated endpoint.
#[derive(Debug)]
pub struct Dispatcher<T = HttpTransport> {
  config: WebhookConfig,
  transport: T,
}

impl Dispatcher<HttpTransport> {
  pub fn from_config(config: WebhookConfig) -> Result<Self, ConfigError> {
    let transport = HttpTransport::new(&config)?;
    Ok(Self::new(config, transport))
  }
}

impl<T: Transport> Dispatcher<T> {
  pub fn new(config: WebhookConfig, transport: T) -> Self {
    Self { config, transport }
  }

  pub fn endpoint(&self) -> &Url {
    &self.config.url
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Serialize `card` and make exactly one delivery attempt.
  pub async fn dispatch(&self, card: &MessageCard) -> Result<(), RelayError> {
    let payload = serde_json::to_vec(card).map_err(RelayError::Serialize)?;
    self.deliver(payload).await?;
    Ok(())
  }

  async fn deliver(&self, payload: Vec<u8>) -> Result<(), DeliveryError> {
    let status = match self.transport.send(&self.config.url, &payload).await {
      Ok(status) => status,
      Err(e) => {
        warn!(error = %e, timed_out = e.timed_out, "webhook request failed");
        return Err(DeliveryError::Transport(e));
      }
    };

    if !(200..300).contains(&status) {
      error!(
        status,
        payload = %String::from_utf8_lossy(&payload),
        "unexpected status code from webhook"
      );
      return Err(DeliveryError::Status { status, payload });
    }

    debug!(status, "card delivered");
    Ok(())
  }
}
