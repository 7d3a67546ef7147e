//! Remote Responder Tests
//!
//! Runs the HTTP responder against a wiremock server.

use crate::actors::messages::{AppError, AskOutcome};
use crate::actors::remote::{RemoteResponder, NO_ANSWER};
use crate::actors::supervisor::{ControllerHandle, ControllerOptions};
use crate::actors::traits::Responder;
use crate::models::Tag;
use crate::render::{ChatView, SidebarView, TranscriptView};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn responder_for(server: &MockServer, timeout: Duration) -> RemoteResponder {
    RemoteResponder::new(&format!("{}/ask", server.uri()), timeout).unwrap()
}

#[tokio::test]
async fn test_answer_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(json!({ "question": "What is Rust?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": "A systems language." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let responder = responder_for(&server, Duration::from_secs(5)).await;
    let answer = responder.respond("What is Rust?".to_string()).await.unwrap();
    assert_eq!(answer, "A systems language.");
}

#[tokio::test]
async fn test_missing_answer_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let responder = responder_for(&server, Duration::from_secs(5)).await;
    assert_eq!(responder.respond("anything".to_string()).await.unwrap(), NO_ANSWER);
}

#[tokio::test]
async fn test_blank_answer_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "   " })))
        .mount(&server)
        .await;

    let responder = responder_for(&server, Duration::from_secs(5)).await;
    assert_eq!(responder.respond("anything".to_string()).await.unwrap(), NO_ANSWER);
}

#[tokio::test]
async fn test_server_error_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let responder = responder_for(&server, Duration::from_secs(5)).await;
    let err = responder.respond("anything".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::Backend(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "answer": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let responder = responder_for(&server, Duration::from_millis(200)).await;
    let err = responder.respond("anything".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::Timeout(_)));
}

#[test]
fn test_invalid_endpoint_is_config_error() {
    let err = RemoteResponder::new("not a url", Duration::from_secs(1)).err().unwrap();
    assert!(matches!(err, AppError::Config(_)));
}

struct NullView;

impl ChatView for NullView {
    fn show_pending(&mut self, _question: &str) {}
    fn clear_pending(&mut self) {}
    fn show_error(&mut self, _message: &str) {}
    fn render_transcript(&mut self, _view: &TranscriptView) {}
    fn render_sidebar(&mut self, _view: &SidebarView) {}
    fn set_input(&mut self, _text: &str) {}
    fn notify(&mut self, _message: &str) {}
}

struct NullClipboard;

#[async_trait]
impl crate::clipboard::Clipboard for NullClipboard {
    async fn copy(&self, _text: &str) -> Result<(), AppError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_controller_with_remote_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "question": "How to learn Python?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Practice." })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "question": "What is AI?" })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let controller = ControllerHandle::spawn(
        Arc::new(responder_for(&server, Duration::from_secs(5)).await),
        NullView,
        Arc::new(NullClipboard),
        ControllerOptions {
            response_timeout: Duration::from_secs(5),
            export_dir: dir.path().to_path_buf(),
            seed_demo: false,
        },
    );

    match controller.ask("How to learn Python?".to_string()).await.unwrap() {
        AskOutcome::Answered(record) => {
            assert_eq!(record.answer, "Practice.");
            assert_eq!(record.tag, Tag::Programming);
        }
        other => panic!("Expected an answer, got {:?}", other),
    }

    let outcome = controller.ask("What is AI?".to_string()).await.unwrap();
    assert!(matches!(outcome, AskOutcome::Failed(_)));
    assert_eq!(controller.records().await.unwrap().len(), 1);
}
