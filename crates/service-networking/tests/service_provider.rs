//! ServiceProvider tests against a scripted transport

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use service_networking::{
    HeaderConfig, NetworkingError, RawOutcome, RawResponse, ServiceDescriptor, ServiceMethod,
    ServiceProvider, ServiceRequest, Transport, TransportError,
};
use tokio::sync::oneshot;

type Handler = Box<dyn Fn(&ServiceRequest) -> RawOutcome + Send + Sync>;

/// Transport returning whatever its handler produces and recording requests
#[derive(Clone)]
struct MockTransport {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<ServiceRequest>>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockTransport")
    }
}

impl MockTransport {
    fn new(handler: impl Fn(&ServiceRequest) -> RawOutcome + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(Box::new(handler)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn responding(status: u16, body: &[u8]) -> Self {
        let body = body.to_vec();
        Self::new(move |_| RawOutcome::response(RawResponse::new(status, body.clone())))
    }

    fn responding_without_body(status: u16) -> Self {
        Self::new(move |_| RawOutcome::response(RawResponse::empty(status)))
    }

    fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.lock().expect("Lock poisoned").clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ServiceRequest) -> RawOutcome {
        self.requests
            .lock()
            .expect("Lock poisoned")
            .push(request.clone());
        (self.handler)(request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct MockCodableObject {
    status: String,
}

fn mock_service() -> ServiceDescriptor {
    ServiceDescriptor::new("https://mockservice.com", "/api/v2/search", ServiceMethod::Get)
}

fn invalid_service() -> ServiceDescriptor {
    ServiceDescriptor::new("invalidURL", "//---", ServiceMethod::Get)
}

const NOT_QUITE_JSON: &[u8] = br#"{
    "response": OK,
}"#;

// === load ===

#[tokio::test]
async fn test_load_invalid_request_returns_invalid_url() {
    let transport = MockTransport::responding(200, b"unused");
    let provider = ServiceProvider::with_transport(transport.clone());

    let result = provider.load(&invalid_service()).await;

    assert_eq!(result, Err(NetworkingError::InvalidURL));
    assert!(transport.requests().is_empty(), "Transport must not be called");
}

#[tokio::test]
async fn test_load_non_http_response_returns_no_response() {
    let provider = ServiceProvider::with_transport(MockTransport::new(|_| {
        RawOutcome::failure(TransportError::Other("not an HTTP response".to_string()))
    }));

    let result = provider.load(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::NoResponseFromServer));
}

#[tokio::test]
async fn test_load_data_present_returns_body() {
    let provider =
        ServiceProvider::with_transport(MockTransport::responding(200, NOT_QUITE_JSON));

    let body = provider
        .load(&mock_service())
        .await
        .expect("Load should succeed");

    assert_eq!(body, NOT_QUITE_JSON.to_vec());
}

#[tokio::test]
async fn test_load_data_absent_returns_no_data() {
    let provider = ServiceProvider::with_transport(MockTransport::responding_without_body(200));

    let result = provider.load(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::NoDataReturned));
}

#[tokio::test]
async fn test_load_data_empty_returns_no_data() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(200, b""));

    let result = provider.load(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::NoDataReturned));
}

#[tokio::test]
async fn test_load_unauthorized_returns_server_error() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(403, b""));

    let result = provider.load(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::ServerError));
}

#[tokio::test]
async fn test_load_error_status_ignores_body() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(
        500,
        br#"{"status":"OK"}"#,
    ));

    let result = provider.load(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::ServerError));
}

#[tokio::test]
async fn test_load_transport_error_with_response_returns_server_error() {
    let provider = ServiceProvider::with_transport(MockTransport::new(|_| {
        RawOutcome::response(RawResponse::new(200, b"partial".to_vec()))
            .with_error(TransportError::Body("connection reset".to_string()))
    }));

    let result = provider.load(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::ServerError));
}

#[tokio::test]
async fn test_load_sends_built_request() {
    let transport = MockTransport::responding(200, b"ok");
    let provider = ServiceProvider::with_transport(transport.clone()).with_config(
        HeaderConfig::new()
            .with_authorization("token")
            .with_user_agent("tests"),
    );
    let service = ServiceDescriptor::new("https://mockservice.com", "/api/v2/items", ServiceMethod::Post)
        .with_parameter("testParameter", "expectedTestValue");

    provider.load(&service).await.expect("Load should succeed");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(
        request.url().as_str(),
        "https://mockservice.com/api/v2/items?testParameter=expectedTestValue"
    );
    assert_eq!(request.method(), ServiceMethod::Post);
    assert_eq!(request.header("Authorization"), Some("Bearer token"));
    assert_eq!(request.header("User-Agent"), Some("tests"));
}

// === load_decoded ===

#[tokio::test]
async fn test_load_decoded_invalid_request_returns_invalid_url() {
    let transport = MockTransport::responding(200, b"unused");
    let provider = ServiceProvider::with_transport(transport.clone());

    let result: Result<MockCodableObject, _> = provider.load_decoded(&invalid_service()).await;

    assert_eq!(result, Err(NetworkingError::InvalidURL));
    assert!(transport.requests().is_empty(), "Transport must not be called");
}

#[tokio::test]
async fn test_load_decoded_server_error() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(503, b""));

    let result: Result<MockCodableObject, _> = provider.load_decoded(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::ServerError));
}

#[tokio::test]
async fn test_load_decoded_valid_object() {
    let object = MockCodableObject {
        status: "OK".to_string(),
    };
    let data = serde_json::to_vec(&object).expect("Serialize object");
    let provider = ServiceProvider::with_transport(MockTransport::responding(200, &data));

    let decoded: MockCodableObject = provider
        .load_decoded(&mock_service())
        .await
        .expect("Decode should succeed");

    assert_eq!(decoded, object);
}

#[tokio::test]
async fn test_load_decoded_invalid_object() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(
        200,
        br#"{"invalid": "not a mock codable object"}"#,
    ));

    let result: Result<MockCodableObject, _> = provider.load_decoded(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::ErrorDecodingResponse));
}

#[tokio::test]
async fn test_load_decoded_malformed_payload() {
    let provider =
        ServiceProvider::with_transport(MockTransport::responding(200, NOT_QUITE_JSON));

    let result: Result<MockCodableObject, _> = provider.load_decoded(&mock_service()).await;

    assert_eq!(result, Err(NetworkingError::ErrorDecodingResponse));
}

// === completion variants ===

#[tokio::test]
async fn test_load_with_delivers_once() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(200, b"ok"));
    let (tx, rx) = oneshot::channel();

    let handle = provider.load_with(&mock_service(), move |result| {
        let _ = tx.send(result);
    });

    let result = rx.await.expect("Completion should run");
    handle.await.expect("Task should finish");

    assert_eq!(result, Ok(b"ok".to_vec()));
}

#[tokio::test]
async fn test_load_with_invalid_url_delivers_error() {
    let transport = MockTransport::responding(200, b"unused");
    let provider = ServiceProvider::with_transport(transport.clone());
    let (tx, rx) = oneshot::channel();

    provider
        .load_with(&invalid_service(), move |result| {
            let _ = tx.send(result);
        })
        .await
        .expect("Task should finish");

    assert_eq!(rx.await.expect("Completion should run"), Err(NetworkingError::InvalidURL));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_load_decoded_with_valid_object() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(
        200,
        br#"{"status":"OK"}"#,
    ));
    let (tx, rx) = oneshot::channel();

    provider
        .load_decoded_with(&mock_service(), move |result: Result<MockCodableObject, _>| {
            let _ = tx.send(result);
        })
        .await
        .expect("Task should finish");

    let decoded = rx
        .await
        .expect("Completion should run")
        .expect("Decode should succeed");
    assert_eq!(decoded.status, "OK");
}

#[tokio::test]
async fn test_load_decoded_with_decode_failure() {
    let provider = ServiceProvider::with_transport(MockTransport::responding(200, b"[1, 2]"));
    let (tx, rx) = oneshot::channel();

    provider
        .load_decoded_with(&mock_service(), move |result: Result<MockCodableObject, _>| {
            let _ = tx.send(result);
        })
        .await
        .expect("Task should finish");

    assert_eq!(
        rx.await.expect("Completion should run"),
        Err(NetworkingError::ErrorDecodingResponse)
    );
}
