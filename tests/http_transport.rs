use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use atlas_data_api::{
    ConnectionConfig, DataApiClient, DataApiError, HttpTransport, QueryOptions, TransportOptions,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: JsonValue,
    delay: Duration,
}

impl MockResponse {
    fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body,
            delay: Duration::from_millis(0),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug)]
struct Captured {
    action: String,
    api_key: Option<String>,
    content_type: Option<String>,
    cors: Option<String>,
    body: JsonValue,
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    captured: Arc<Mutex<Vec<Captured>>>,
    hits: Arc<AtomicUsize>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn action_handler(
    State(state): State<MockState>,
    Path(action): Path<String>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .captured
        .lock()
        .expect("capture mutex must not be poisoned")
        .push(Captured {
            action,
            api_key: header(&headers, "api-key"),
            content_type: header(&headers, "content-type"),
            cors: header(&headers, "access-control-request-headers"),
            body: serde_json::from_str(&body).unwrap_or(JsonValue::Null),
        });

    let response = {
        let mut queue = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        queue.pop_front().unwrap_or_else(|| {
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "no mock response available"}),
            )
        })
    };

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    (response.status, Json(response.body))
}

struct TestServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<Captured>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    fn endpoint(&self) -> String {
        format!("{}/endpoint/data/v1", self.base_url)
    }

    fn captured(&self) -> Vec<Captured> {
        self.captured
            .lock()
            .expect("capture mutex must not be poisoned")
            .clone()
    }
}

async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        captured: Arc::default(),
        hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/endpoint/data/v1/action/:action", post(action_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        captured: state.captured,
        task,
    }
}

fn client_for(server: &TestServer, options: TransportOptions) -> DataApiClient {
    let config = ConnectionConfig::new("Cluster0", "shop", "live-key", server.endpoint())
        .expect("must build config");
    DataApiClient::new(config, HttpTransport::new().with_options(options))
}

#[tokio::test]
async fn posts_body_and_headers_to_action_path() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({ "documents": [{ "name": "Ada" }] }),
    )])
    .await;
    let client = client_for(&server, TransportOptions::default());

    let result = client
        .try_find::<JsonValue>(
            "users",
            json!({ "name": "Ada" }),
            Some(QueryOptions::new().limit(1)),
        )
        .await
        .expect("find must succeed");
    assert_eq!(result.documents, vec![json!({ "name": "Ada" })]);

    let captured = server.captured();
    assert_eq!(captured.len(), 1);
    let request = &captured[0];
    assert_eq!(request.action, "find");
    assert_eq!(request.api_key.as_deref(), Some("live-key"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.cors.as_deref(), Some("*"));
    assert_eq!(
        request.body,
        json!({
            "dataSource": "Cluster0",
            "database": "shop",
            "collection": "users",
            "filter": { "name": "Ada" },
            "limit": 1
        })
    );
}

#[tokio::test]
async fn non_success_status_surfaces_http_error() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::UNAUTHORIZED,
        json!({ "error": "invalid api key" }),
    )])
    .await;
    let client = client_for(&server, TransportOptions::default());

    let err = client
        .try_delete_one("users", json!({}))
        .await
        .expect_err("unauthorized must fail");
    match err {
        DataApiError::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid api key"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_on_retryable_http_status() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "busy" })),
        MockResponse::json(StatusCode::OK, json!({ "deletedCount": 2 })),
    ])
    .await;
    let client = client_for(
        &server,
        TransportOptions {
            timeout_ms: 1_000,
            max_retries: 1,
            retry_backoff_ms: 1,
        },
    );

    let result = client
        .delete_many("users", json!({ "active": false }))
        .await
        .expect("request must succeed after retry");
    assert_eq!(result.deleted_count, 2);
    assert_eq!(server.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn request_timeout_surfaces_transport_error() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({ "deletedCount": 1 }),
    )
    .with_delay(Duration::from_millis(150))])
    .await;
    let client = client_for(
        &server,
        TransportOptions {
            timeout_ms: 20,
            max_retries: 0,
            retry_backoff_ms: 1,
        },
    );

    let err = client
        .try_delete_one("users", json!({}))
        .await
        .expect_err("request must timeout");
    match err {
        DataApiError::Transport(inner) => assert!(inner.is_timeout()),
        other => panic!("expected transport timeout error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_is_logged_by_never_failing_surface() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::BAD_REQUEST,
        json!({ "error": "bad filter" }),
    )])
    .await;
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&messages);
    let client = client_for(&server, TransportOptions::default()).with_logger(move |message| {
        sink.lock()
            .expect("log mutex must not be poisoned")
            .push(message.to_owned())
    });

    let result = client.find_one::<JsonValue>("users", json!({}), None).await;
    assert!(result.is_none());

    let messages = messages.lock().expect("log mutex must not be poisoned");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("http error 400"));
}
