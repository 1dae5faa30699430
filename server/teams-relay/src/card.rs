//! Mapper: incident notification -> MessageCard. Pure and total.

use chrono::DateTime;

use crate::humanize;
use crate::types::*;

/// Rendered in place of an empty policy or condition name.
pub const PLACEHOLDER: &str = "-";
pub const NO_SUMMARY: &str = "No summary available.";
pub const VIEW_INCIDENT: &str = "View Incident";
pub const DEFAULT_OS: &str = "default";

pub const FACT_INCIDENT_ID: &str = "Incident ID";
pub const FACT_CONDITION: &str = "Condition";
pub const FACT_STARTED_AT: &str = "Started at";
pub const FACT_ENDED_AT: &str = "Ended at";

/// Build the card for one notification. Never fails; missing data degrades
/// to placeholders.
pub fn map(notification: &Notification) -> MessageCard {
  let incident = &notification.incident;
  let policy_name = or_placeholder(&incident.policy_name);

  let state = IncidentState::classify(&incident.state);
  let title = format!(r#"Incident {} for "{}"."#, state.verb(), policy_name);

  let summary = if incident.summary.is_empty() {
    NO_SUMMARY.to_string()
  } else {
    incident.summary.clone()
  };

  MessageCard {
    card_type: CARD_TYPE.into(),
    context: CARD_CONTEXT.into(),
    summary: summary.clone(),
    title,
    text: summary,
    theme_color: state.theme_color().into(),
    sections: vec![Section {
      facts: facts(incident),
    }],
    potential_action: vec![PotentialAction {
      action_type: OPEN_URI.into(),
      name: VIEW_INCIDENT.into(),
      targets: vec![ActionTarget {
        os: DEFAULT_OS.into(),
        uri: incident.url.clone(),
      }],
    }],
  }
}

/// Facts in display order. "Ended at" is only shown next to "Started at".
fn facts(incident: &Incident) -> Vec<Fact> {
  let mut facts = vec![
    Fact::new(FACT_INCIDENT_ID, incident.incident_id.clone()),
    Fact::new(FACT_CONDITION, or_placeholder(&incident.condition_name)),
  ];

  if let Some(started) = incident.started_at() {
    facts.push(Fact::new(FACT_STARTED_AT, render_timestamp(started)));
    if let Some(ended) = incident.ended_at() {
      facts.push(Fact::new(
        FACT_ENDED_AT,
        format!("{} ({})", render_timestamp(ended), humanize::elapsed(started, ended)),
      ));
    }
  }

  facts
}

fn or_placeholder(s: &str) -> &str {
  if s.is_empty() {
    PLACEHOLDER
  } else {
    s
  }
}

/// Epoch seconds as `YYYY-MM-DD HH:MM:SS +0000 UTC`.
pub fn render_timestamp(secs: i64) -> String {
  match DateTime::from_timestamp(secs, 0) {
    Some(dt) => dt.format("%Y-%m-%d %H:%M:%S %z UTC").to_string(),
    None => format!("{}s", secs),
  }
}
