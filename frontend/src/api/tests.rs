use super::*;
use feedapp_shared::protocol::ListFeedbackRequest;
use feedapp_shared::{FeedbackRequest, Sentiment};
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Mutex;

// =========================================================
// Shared Mock Components
// =========================================================

/// Replays canned responses and records every request it receives
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message)));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no canned response")))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<(ToastLevel, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn seen(&self) -> Vec<(ToastLevel, String)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: ToastLevel, message: String) {
        self.seen.lock().unwrap().push((level, message));
    }
}

pub(crate) fn setup(
    transport: MockTransport,
) -> (Arc<MockTransport>, Arc<RecordingNotifier>, ApiClient) {
    let transport = Arc::new(transport);
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::new("https://api.test/", transport.clone(), notifier.clone()).unwrap();
    (transport, notifier, client)
}

#[derive(Debug, Deserialize, PartialEq)]
struct Echo {
    ok: bool,
}

// =========================================================
// Tests
// =========================================================

#[test]
fn empty_base_url_is_rejected() {
    let transport = Arc::new(MockTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let result = ApiClient::new("   ", transport, notifier);
    assert!(matches!(result, Err(ConfigError::MissingApiUrl)));
}

#[test]
fn status_messages() {
    assert_eq!(status_notification(401), "Unauthorized.");
    assert_eq!(status_notification(403), "Forbidden.");
    assert_eq!(status_notification(404), "Not Found.");
    assert_eq!(status_notification(500), "API Error: 500");
    assert_eq!(status_notification(422), "API Error: 422");
}

#[tokio::test]
async fn not_found_notifies_once_and_rejects_with_status() {
    let (_, notifier, client) = setup(MockTransport::default().respond(404, "{\"detail\":\"nope\"}"));

    let err = client.get::<Echo>("/missing").await.unwrap_err();

    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "Request failed with status code 404");
    assert_eq!(err.data.as_deref(), Some("{\"detail\":\"nope\"}"));
    assert_eq!(notifier.seen(), vec![(ToastLevel::Error, "Not Found.".to_string())]);
}

#[tokio::test]
async fn every_verb_reports_failures_the_same_way() {
    let transport = MockTransport::default()
        .respond(401, "")
        .respond(403, "")
        .respond(500, "")
        .respond(502, "")
        .respond(404, "");
    let (_, notifier, client) = setup(transport);

    let req = FeedbackRequest { rating: 1, comment: "x".into() };

    assert!(client.post::<_, Echo>("a", &req).await.unwrap_err().is_status(401));
    assert!(client.put::<_, Echo>("b", &req).await.unwrap_err().is_status(403));
    assert!(client.patch::<_, Echo>("c", &req).await.unwrap_err().is_status(500));
    assert!(client.delete::<Echo>("d").await.unwrap_err().is_status(502));
    let err = client.get::<Echo>("e").await.unwrap_err();
    assert!(err.is_status(404));
    assert_eq!(err.data, None);

    let messages: Vec<String> = notifier.seen().into_iter().map(|(_, m)| m).collect();
    assert_eq!(
        messages,
        vec!["Unauthorized.", "Forbidden.", "API Error: 500", "API Error: 502", "Not Found."]
    );
}

#[tokio::test]
async fn network_failure_has_no_status_and_no_toast() {
    let (_, notifier, client) = setup(MockTransport::default().fail("connection refused"));

    let err = client.get::<Echo>("/ping").await.unwrap_err();

    assert_eq!(err.status, None);
    assert_eq!(err.message, "connection refused");
    assert!(notifier.seen().is_empty());
}

#[tokio::test]
async fn builds_urls_and_json_headers() {
    let (transport, _, client) = setup(
        MockTransport::default()
            .respond(200, "{\"ok\":true}")
            .respond(200, "{\"ok\":true}"),
    );

    assert_eq!(client.get::<Echo>("/status").await.unwrap(), Echo { ok: true });
    client.with_token("t0k").get::<Echo>("status").await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].url, "https://api.test/status");
    assert_eq!(requests[1].url, "https://api.test/status");
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].body, None);
    assert_eq!(requests[0].headers.get("Content-Type").map(String::as_str), Some("application/json"));
    assert_eq!(requests[0].headers.get("Authorization"), None);
    assert_eq!(
        requests[1].headers.get("Authorization").map(String::as_str),
        Some("Bearer t0k")
    );
}

#[tokio::test]
async fn typed_call_uses_declared_route() {
    let (transport, _, client) = setup(MockTransport::default().respond(
        201,
        "{\"message\":\"Thanks\",\"predicted_sentiment\":\"negative\"}",
    ));

    let resp = client
        .call(&FeedbackRequest {
            rating: 2,
            comment: "slow".into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.message, "Thanks");
    assert_eq!(resp.predicted_sentiment, Sentiment::Negative);

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.url, "https://api.test/feedback");
    assert_eq!(sent.body.as_deref(), Some("{\"rating\":2,\"comment\":\"slow\"}"));
}

#[tokio::test]
async fn get_requests_send_no_body() {
    let (transport, _, client) = setup(MockTransport::default().respond(
        200,
        "{\"reviews\":[],\"summary\":{\"total_reviews\":0,\"positive\":0,\"neutral\":0,\"negative\":0,\"unknown\":0}}",
    ));

    let resp = client.call(&ListFeedbackRequest).await.unwrap();

    assert!(resp.reviews.is_empty());
    let sent = &transport.requests()[0];
    assert_eq!(sent.url, "https://api.test/admin/feedback");
    assert_eq!(sent.body, None);
}

#[tokio::test]
async fn empty_success_body_decodes_as_unit() {
    let (_, notifier, client) = setup(MockTransport::default().respond(204, ""));
    client.delete::<()>("/items/1").await.unwrap();
    assert!(notifier.seen().is_empty());
}

#[tokio::test]
async fn undecodable_body_is_an_error_without_toast() {
    let (_, notifier, client) = setup(MockTransport::default().respond(200, "<html>"));

    let err = client.get::<Echo>("/status").await.unwrap_err();

    assert_eq!(err.status, Some(200));
    assert!(err.message.starts_with("Invalid response body"));
    assert_eq!(err.data.as_deref(), Some("<html>"));
    assert!(notifier.seen().is_empty());
}
