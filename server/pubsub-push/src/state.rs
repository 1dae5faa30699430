//! Shared, read-only service state.

use teams_relay::{Dispatcher, HttpTransport, Transport};

pub struct AppState<T = HttpTransport> {
  pub dispatcher: Dispatcher<T>,
}

impl<T: Transport> AppState<T> {
  pub fn new(dispatcher: Dispatcher<T>) -> Self {
    Self { dispatcher }
  }
}
