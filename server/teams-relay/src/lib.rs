//! Teams Relay: monitoring incident notification -> Teams MessageCard -> webhook.
//!
//! Each invocation decodes one notification, maps it to a card with a pure
//! function, and posts the card once to the configured webhook.
//!
//! No retries, no persistence; the message queue owns redelivery.

pub mod card;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod humanize;
pub mod relay;
pub mod types;

pub use card::map;
pub use config::WebhookConfig;
pub use dispatch::{Dispatcher, HttpTransport, Transport};
pub use error::{ConfigError, DeliveryError, RelayError, TransportError};
pub use relay::handle_message;
pub use types::{Incident, MessageCard, Notification};
pub use url::Url;
