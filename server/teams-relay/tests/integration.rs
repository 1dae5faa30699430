//! Integration tests for the relay: decode -> map -> dispatch, over a fake
//! transport and over real HTTP against a local server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
  body::Bytes,
  extract::State,
  http::{header, HeaderMap, StatusCode},
  routing::post,
  Router,
};
use teams_relay::types::{MessageCard, ALERT_COLOR};
use teams_relay::{
  handle_message, map, relay, DeliveryError, Dispatcher, HttpTransport, RelayError, Transport,
  TransportError, WebhookConfig,
};
use url::Url;

const SCENARIO: &str = r#"{"incident":{"incident_id":"I1","resource_id":"r","resource_name":"n","state":"open","started_at":1700000000,"policy_name":"CPU High","condition_name":"cpu>90","url":"https://x/1","summary":""}}"#;

// ---------------------------------------------------------------------------
// Fake transport
// ---------------------------------------------------------------------------

struct FakeTransport {
  status: u16,
  sent: Mutex<Vec<Vec<u8>>>,
}

impl FakeTransport {
  fn new(status: u16) -> Self {
    Self {
      status,
      sent: Mutex::new(Vec::new()),
    }
  }
}

impl Transport for FakeTransport {
  async fn send(&self, _url: &Url, body: &[u8]) -> Result<u16, TransportError> {
    self.sent.lock().unwrap().push(body.to_vec());
    Ok(self.status)
  }
}

fn fake_dispatcher(status: u16) -> Dispatcher<FakeTransport> {
  let config = WebhookConfig::new("https://hooks.example.com/teams").unwrap();
  Dispatcher::new(config, FakeTransport::new(status))
}

// ---------------------------------------------------------------------------
// Local webhook receiver
// ---------------------------------------------------------------------------

/// Records every request it gets and answers with a fixed status, optionally
/// after a delay.
#[derive(Clone)]
struct Receiver {
  status: StatusCode,
  delay: Duration,
  bodies: Arc<Mutex<Vec<Vec<u8>>>>,
  headers: Arc<Mutex<Vec<HeaderMap>>>,
}

async fn receive(State(rx): State<Receiver>, headers: HeaderMap, body: Bytes) -> StatusCode {
  rx.headers.lock().unwrap().push(headers);
  rx.bodies.lock().unwrap().push(body.to_vec());
  tokio::time::sleep(rx.delay).await;
  rx.status
}

async fn spawn_receiver(status: StatusCode) -> (SocketAddr, Receiver) {
  spawn_slow_receiver(status, Duration::ZERO).await
}

async fn spawn_slow_receiver(status: StatusCode, delay: Duration) -> (SocketAddr, Receiver) {
  let rx = Receiver {
    status,
    delay,
    bodies: Arc::new(Mutex::new(Vec::new())),
    headers: Arc::new(Mutex::new(Vec::new())),
  };
  let app = Router::new().route("/hook", post(receive)).with_state(rx.clone());
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  (addr, rx)
}

fn http_dispatcher_with_timeout(addr: SocketAddr, timeout: Duration) -> Dispatcher<HttpTransport> {
  let config = WebhookConfig::new(&format!("http://{}/hook", addr))
    .unwrap()
    .with_timeout(timeout);
  Dispatcher::from_config(config).unwrap()
}

fn http_dispatcher(addr: SocketAddr) -> Dispatcher<HttpTransport> {
  http_dispatcher_with_timeout(addr, Duration::from_secs(5))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn scenario_maps_to_expected_card() {
  let notification = relay::decode(SCENARIO.as_bytes()).unwrap();
  let card = map(&notification);

  assert_eq!(card.title, r#"Incident opened for "CPU High"."#);
  assert_eq!(card.theme_color, ALERT_COLOR);
  assert_eq!(card.text, "No summary available.");
  assert_eq!(card.summary, "No summary available.");

  let facts: Vec<(&str, &str)> = card
    .facts()
    .map(|f| (f.name.as_str(), f.value.as_str()))
    .collect();
  assert_eq!(
    facts,
    vec![
      ("Incident ID", "I1"),
      ("Condition", "cpu>90"),
      ("Started at", "2023-11-14 22:13:20 +0000 UTC"),
    ]
  );

  assert_eq!(card.potential_action.len(), 1);
  assert_eq!(card.potential_action[0].targets[0].uri, "https://x/1");
}

#[test]
fn card_round_trips_through_wire_format() {
  let card = map(&relay::decode(SCENARIO.as_bytes()).unwrap());
  let json = serde_json::to_string(&card).unwrap();
  let back: MessageCard = serde_json::from_str(&json).unwrap();
  assert_eq!(back, card);
}

#[test]
fn unknown_fields_are_ignored() {
  let json = r#"{
    "incident": {
      "incident_id": "I2",
      "state": "closed",
      "scoping_project_id": "my-project",
      "observed_value": "0.97",
      "threshold_value": "0.9"
    },
    "version": "1.2",
    "extra": {"nested": true}
  }"#;
  let card = map(&relay::decode(json.as_bytes()).unwrap());
  assert_eq!(card.fact("Incident ID"), Some("I2"));
}

#[tokio::test]
async fn invalid_json_is_decode_error_and_nothing_is_sent() {
  let d = fake_dispatcher(200);
  let err = handle_message(&d, b"{not json").await.unwrap_err();
  assert!(matches!(err, RelayError::Decode(_)));
  assert!(d.transport().sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_shape_is_decode_error() {
  let d = fake_dispatcher(200);
  let err = handle_message(&d, br#"{"incident": "oops"}"#).await.unwrap_err();
  assert!(matches!(err, RelayError::Decode(_)));
}

#[tokio::test]
async fn relay_sends_mapped_card() {
  let d = fake_dispatcher(200);
  handle_message(&d, SCENARIO.as_bytes()).await.unwrap();

  let sent = d.transport().sent.lock().unwrap();
  assert_eq!(sent.len(), 1);
  let card: MessageCard = serde_json::from_slice(&sent[0]).unwrap();
  assert_eq!(card.title, r#"Incident opened for "CPU High"."#);
}

#[tokio::test]
async fn http_delivery_posts_json_card() {
  let (addr, rx) = spawn_receiver(StatusCode::OK).await;
  let d = http_dispatcher(addr);

  handle_message(&d, SCENARIO.as_bytes()).await.unwrap();

  let headers = rx.headers.lock().unwrap();
  assert_eq!(
    headers[0].get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
    Some("application/json")
  );

  let bodies = rx.bodies.lock().unwrap();
  assert_eq!(bodies.len(), 1);
  let value: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
  assert_eq!(value["@type"], "MessageCard");
  assert_eq!(value["themeColor"], "#F5222D");
  assert_eq!(value["potentialAction"][0]["targets"][0]["uri"], "https://x/1");
}

#[tokio::test]
async fn http_500_yields_status_error_with_exact_payload() {
  let (addr, rx) = spawn_receiver(StatusCode::INTERNAL_SERVER_ERROR).await;
  let d = http_dispatcher(addr);

  let err = handle_message(&d, SCENARIO.as_bytes()).await.unwrap_err();
  let received = rx.bodies.lock().unwrap()[0].clone();
  match err {
    RelayError::Delivery(e) => {
      assert_eq!(e.status(), Some(500));
      assert_eq!(e.payload(), Some(received.as_slice()));
    }
    other => panic!("expected delivery failure, got {:?}", other),
  }
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
  // Grab a free port, then close it so nothing is listening.
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let d = http_dispatcher(addr);
  let err = handle_message(&d, SCENARIO.as_bytes()).await.unwrap_err();
  assert!(matches!(
    err,
    RelayError::Delivery(DeliveryError::Transport(_))
  ));
}

#[tokio::test]
async fn slow_webhook_hits_timeout() {
  let (addr, _rx) = spawn_slow_receiver(StatusCode::OK, Duration::from_secs(5)).await;
  let d = http_dispatcher_with_timeout(addr, Duration::from_millis(300));

  let started = std::time::Instant::now();
  let err = handle_message(&d, SCENARIO.as_bytes()).await.unwrap_err();
  assert!(started.elapsed() < Duration::from_secs(4), "timeout was not applied");
  match err {
    RelayError::Delivery(DeliveryError::Transport(e)) => {
      assert!(e.timed_out, "expected a timeout, got {:?}", e)
    }
    other => panic!("expected transport failure, got {:?}", other),
  }
}
