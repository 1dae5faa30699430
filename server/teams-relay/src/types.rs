//! Core types for the relay (inbound notification + outbound MessageCard).

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Inbound types (JSON contract: what the monitoring system publishes)
// ---------------------------------------------------------------------------

/// One notification message. Unknown fields are silently ignored; a missing
/// or `null` incident decodes as an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
  #[serde(default, deserialize_with = "null_as_default")]
  pub incident: Incident,
  #[serde(default, deserialize_with = "null_as_default")]
  pub version: String,
}

/// The incident record. Missing or `null` fields take their zero value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Incident {
  #[serde(deserialize_with = "null_as_default")]
  pub incident_id: String,
  #[serde(deserialize_with = "null_as_default")]
  pub resource_id: String,
  #[serde(deserialize_with = "null_as_default")]
  pub resource_name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub state: String,
  pub started_at: Option<i64>,
  pub ended_at: Option<i64>,
  #[serde(deserialize_with = "null_as_default")]
  pub policy_name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub condition_name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub url: String,
  #[serde(deserialize_with = "null_as_default")]
  pub summary: String,
}

impl Incident {
  /// Epoch seconds, or `None` when absent or zero.
  pub fn started_at(&self) -> Option<i64> {
    self.started_at.filter(|&t| t > 0)
  }

  pub fn ended_at(&self) -> Option<i64> {
    self.ended_at.filter(|&t| t > 0)
  }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Incident state (normalized)
// ---------------------------------------------------------------------------

/// Only the exact string `"open"` is open; everything else renders as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentState {
  Open,
  Closed,
}

impl IncidentState {
  pub fn classify(s: &str) -> Self {
    match s {
      "open" => Self::Open,
      _ => Self::Closed,
    }
  }

  pub fn verb(self) -> &'static str {
    match self {
      Self::Open => "opened",
      Self::Closed => "closed",
    }
  }

  pub fn theme_color(self) -> &'static str {
    match self {
      Self::Open => ALERT_COLOR,
      Self::Closed => INFO_COLOR,
    }
  }
}

/// Red.
pub const ALERT_COLOR: &str = "#F5222D";
/// Blue.
pub const INFO_COLOR: &str = "#1890FF";

// ---------------------------------------------------------------------------
// Output types (JSON contract: what the webhook receives)
// ---------------------------------------------------------------------------

pub const CARD_TYPE: &str = "MessageCard";
pub const CARD_CONTEXT: &str = "https://schema.org/extensions";
pub const OPEN_URI: &str = "OpenUri";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCard {
  #[serde(rename = "@type")]
  pub card_type: String,
  #[serde(rename = "@context")]
  pub context: String,
  pub summary: String,
  pub title: String,
  pub text: String,
  #[serde(rename = "themeColor")]
  pub theme_color: String,
  pub sections: Vec<Section>,
  #[serde(rename = "potentialAction")]
  pub potential_action: Vec<PotentialAction>,
}

impl MessageCard {
  /// Facts of all sections, in display order.
  pub fn facts(&self) -> impl Iterator<Item = &Fact> {
    self.sections.iter().flat_map(|s| s.facts.iter())
  }

  pub fn fact(&self, name: &str) -> Option<&str> {
    self.facts().find(|f| f.name == name).map(|f| f.value.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
  pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
  pub name: String,
  pub value: String,
}

impl Fact {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialAction {
  #[serde(rename = "@type")]
  pub action_type: String,
  pub name: String,
  pub targets: Vec<ActionTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
  pub os: String,
  pub uri: String,
}
