//! # Mock Transports & Testing Guide
//!
//! Everything above the [`Transport`] seam is real code: typed clients, list and edit
//! controllers, dialogs. Tests swap only the transport, which lets them drive the whole
//! flow deterministically without a backend.
//!
//! ## When to use which mock
//!
//! | Feature | `create_mock_transport` | `MockTransport` |
//! |---------|-------------------------|-----------------|
//! | **Style** | Test answers each request by hand | Expectations queued up front |
//! | **In-flight state** | Observable (request is parked until answered) | Not observable |
//! | **Use Case** | Saving/loading flag lifecycles, ordering | Flows, error injection, request counting |
//!
//! ## Pattern 1: Fluent expectations
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{Identified, ResourceClient, RestEntity};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Customer { id: Option<i64>, full_name: String }
//! #[derive(Debug, Serialize)]
//! struct CustomerPatch { id: i64 }
//! impl Identified for Customer { fn identity(&self) -> Option<i64> { self.id } }
//! impl Identified for CustomerPatch { fn identity(&self) -> Option<i64> { Some(self.id) } }
//! impl RestEntity for Customer {
//!     const RESOURCE: &'static str = "api/customers";
//!     const NAME: &'static str = "Customer";
//!     type Patch = CustomerPatch;
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("api/customers/1")
//!         .return_json(json!({ "id": 1, "full_name": "Ada" }));
//!
//!     let client = mock.client::<Customer>();
//!     let customer = client.find(1).await.unwrap().unwrap();
//!     assert_eq!(customer.full_name, "Ada");
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 2: Answering by hand
//!
//! ```rust
//! use resource_framework::mock::create_mock_transport;
//! use resource_framework::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (transport, mut requests) = create_mock_transport(8);
//!     let call = tokio::spawn(async move {
//!         transport
//!             .send(ApiRequest::new(HttpMethod::Get, "api/customers"))
//!             .await
//!     });
//!
//!     let (request, respond_to) = requests.recv().await.unwrap();
//!     assert_eq!(request.path, "api/customers");
//!     respond_to.send(Ok(ApiResponse::ok(json!([])))).unwrap();
//!
//!     assert!(call.await.unwrap().is_ok());
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! Use `return_status(500)` for a backend error or `return_err` for anything else
//! (connection refused, decode failure, ...).

use crate::client::ResourceClient;
use crate::entity::RestEntity;
use crate::error::FrameworkError;
use crate::route::{NavigationEvent, Navigator, RouteQuery};
use crate::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A parked request and the channel its answer goes back on.
pub type PendingCall = (
    ApiRequest,
    oneshot::Sender<Result<ApiResponse, FrameworkError>>,
);

// =============================================================================
// CHANNEL-BACKED TRANSPORT
// =============================================================================

/// Transport that forwards every request to the test through an mpsc channel.
#[derive(Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<PendingCall>,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send((request, respond_to))
            .await
            .map_err(|_| FrameworkError::Transport("mock receiver dropped".to_string()))?;
        response
            .await
            .map_err(|_| FrameworkError::Transport("mock responder dropped".to_string()))?
    }
}

/// Creates a transport and the receiver the test reads requests from.
///
/// Each request stays pending until the test answers through its responder, so state
/// that only exists while a call is in flight (e.g. `is_saving`) can be asserted.
pub fn create_mock_transport(
    buffer_size: usize,
) -> (Arc<ChannelTransport>, mpsc::Receiver<PendingCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(ChannelTransport { sender }), receiver)
}

/// Waits for the next request and checks its method.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingCall>,
    method: HttpMethod,
) -> Option<PendingCall> {
    match receiver.recv().await {
        Some(call) if call.0.method == method => Some(call),
        _ => None,
    }
}

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

struct Expectation {
    method: HttpMethod,
    path: String,
    delay: Option<Duration>,
    response: Result<ApiResponse, FrameworkError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    received: Vec<ApiRequest>,
}

/// A transport answering from a FIFO queue of expectations.
///
/// Requests must arrive in the order the expectations were queued, with matching
/// method and path; anything else fails with [`FrameworkError::Unexpected`].
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// A typed client sending through this mock.
    pub fn client<T: RestEntity>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.transport())
    }

    pub fn expect(&self, method: HttpMethod, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            delay: None,
            state: self.state.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Put, path)
    }

    pub fn expect_patch(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Patch, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Delete, path)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().received.clone()
    }

    /// Number of received requests with `method` on `path`.
    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.lock()
            .received
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.lock().expectations.len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FrameworkError> {
        let expectation = {
            let mut state = self.lock();
            state.received.push(request.clone());
            state.expectations.pop_front()
        };

        let Some(expectation) = expectation else {
            return Err(FrameworkError::Unexpected(format!(
                "{} {} (no expectation left)",
                request.method, request.path
            )));
        };
        if expectation.method != request.method || expectation.path != request.path {
            return Err(FrameworkError::Unexpected(format!(
                "{} {} (expected {} {})",
                request.method, request.path, expectation.method, expectation.path
            )));
        }
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Builder for one queued expectation.
pub struct ExpectationBuilder {
    method: HttpMethod,
    path: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Holds the answer back for `delay` once the request arrives.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push(self, response: Result<ApiResponse, FrameworkError>) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            delay: self.delay,
            response,
        });
    }

    /// Answers 200 with `body`.
    pub fn return_json(self, body: Value) {
        self.push(Ok(ApiResponse::ok(body)));
    }

    /// Answers 200 with `body` and an `X-Total-Count` header.
    pub fn return_page(self, body: Value, total_count: u64) {
        self.push(Ok(ApiResponse::ok(body).with_total_count(total_count)));
    }

    /// Answers 200 with no body.
    pub fn return_empty(self) {
        self.push(Ok(ApiResponse::empty(200)));
    }

    /// Answers with a non-2xx status, as the HTTP transport would report it.
    pub fn return_status(self, status: u16) {
        self.push(Err(FrameworkError::Status {
            status,
            body: String::new(),
        }));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// Navigator that records every effect instead of routing.
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: NavigationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn back_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NavigationEvent::Back))
            .count()
    }

    /// The last query navigated to, if any.
    pub fn last_query(&self) -> Option<RouteQuery> {
        self.events().into_iter().rev().find_map(|e| match e {
            NavigationEvent::Query(query) => Some(query),
            _ => None,
        })
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, query: RouteQuery) {
        self.record(NavigationEvent::Query(query));
    }

    fn previous_state(&self) {
        self.record(NavigationEvent::Back);
    }

    fn not_found(&self) {
        self.record(NavigationEvent::NotFound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Identified;
    use assert_matches::assert_matches;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Consent {
        id: Option<i64>,
        consented: bool,
    }

    #[derive(Debug, Serialize)]
    struct ConsentPatch {
        id: i64,
    }

    impl Identified for Consent {
        fn identity(&self) -> Option<i64> {
            self.id
        }
    }

    impl Identified for ConsentPatch {
        fn identity(&self) -> Option<i64> {
            Some(self.id)
        }
    }

    impl RestEntity for Consent {
        const RESOURCE: &'static str = "api/kyc-consents";
        const NAME: &'static str = "KycConsent";
        type Patch = ConsentPatch;
    }

    #[tokio::test]
    async fn test_channel_transport() {
        let (transport, mut receiver) = create_mock_transport(10);
        let client = ResourceClient::<Consent>::new(transport);

        let create_task = tokio::spawn(async move {
            client
                .create(&Consent {
                    id: None,
                    consented: true,
                })
                .await
        });

        let (request, responder) = expect_request(&mut receiver, HttpMethod::Post)
            .await
            .expect("Expected POST request");
        assert_eq!(request.path, "api/kyc-consents");
        assert_eq!(request.body, Some(json!({ "id": null, "consented": true })));
        responder
            .send(Ok(ApiResponse::ok(json!({ "id": 12, "consented": true }))))
            .unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, Some(12));
    }

    #[tokio::test]
    async fn test_mock_transport_with_expectations() {
        let mock = MockTransport::new();
        mock.expect_get("api/kyc-consents/3")
            .return_json(json!({ "id": 3, "consented": false }));
        mock.expect_delete("api/kyc-consents/3").return_empty();

        let client = mock.client::<Consent>();
        let found = client.find(3).await.unwrap();
        assert_eq!(
            found,
            Some(Consent {
                id: Some(3),
                consented: false
            })
        );
        client.delete(3).await.unwrap();

        assert_eq!(mock.count(HttpMethod::Delete, "api/kyc-consents/3"), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn unexpected_request_is_an_error() {
        let mock = MockTransport::new();
        mock.expect_get("api/kyc-consents").return_json(json!([]));

        let result = mock.client::<Consent>().delete(1).await;
        assert_matches!(result, Err(FrameworkError::Unexpected(_)));
    }

    #[tokio::test]
    async fn missing_record_maps_to_none() {
        let mock = MockTransport::new();
        mock.expect_get("api/kyc-consents/99").return_status(404);

        let found = mock.client::<Consent>().find(99).await.unwrap();
        assert!(found.is_none());
        mock.verify();
    }

    #[test]
    fn recording_navigator_keeps_order() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(RouteQuery::new().with("page", "2"));
        navigator.previous_state();

        assert_eq!(navigator.back_count(), 1);
        assert_eq!(
            navigator.last_query().and_then(|q| q.get_u32("page")),
            Some(2)
        );
    }
}
