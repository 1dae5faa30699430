//! Binary entrypoint: read one notification payload from stdin and relay it.
//!
//! Useful for replaying a captured message by hand:
//!   TEAMS_WEBHOOK_URL=https://... teams-relay < notification.json
//!
//! Exit code 0 on delivery, 1 on any error (config, decode, delivery).

use std::io::{self, Read};
use std::process::ExitCode;

use teams_relay::{handle_message, Dispatcher, WebhookConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!(error = %e, "teams-relay failed");
      ExitCode::FAILURE
    }
  }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
  // Config first: a bad destination must fail before anything is read or sent.
  let config = WebhookConfig::from_env()?;
  let dispatcher = Dispatcher::from_config(config)?;

  let mut raw = Vec::new();
  io::stdin().lock().read_to_end(&mut raw)?;

  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()?;
  runtime.block_on(handle_message(&dispatcher, &raw))?;
  Ok(())
}
