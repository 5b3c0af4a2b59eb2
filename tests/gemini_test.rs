use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use augur::error::AttemptError;
use augur::generator::gemini::GeminiGenerator;
use augur::generator::{GenerateRequest, Generator, ToolDescriptor};
use augur::resilience::{CallOutcome, ResilientCaller, RetryPolicy};

const GOOD_BODY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"**Palo Alto** leads consolidation."}]}}]}"#;

/// Read one HTTP/1.1 request (headers plus content-length body).
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Serve the given responses to consecutive connections, one each.
/// Resolves to the raw requests received.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut stream).await);
            let reply = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
        seen
    });

    (base_url, handle)
}

fn request(tools: Vec<ToolDescriptor>) -> GenerateRequest {
    GenerateRequest::new(
        "Summarize the sector health.",
        "You are a management consultant.",
        tools,
    )
    .unwrap()
}

fn generator(base_url: &str) -> GeminiGenerator {
    GeminiGenerator::new("test-key", Some("gemini-test".to_string())).with_base_url(base_url)
}

#[tokio::test]
async fn posts_payload_and_extracts_text() {
    let (base_url, server) = serve(vec![(200, GOOD_BODY)]).await;

    let text = generator(&base_url)
        .generate(&request(vec![ToolDescriptor::google_search()]))
        .await
        .unwrap();
    // The raw generator does not strip emphasis; the resilient caller does.
    assert_eq!(text, "**Palo Alto** leads consolidation.");

    let raw = server.await.unwrap().remove(0);
    assert!(raw.starts_with("POST /v1beta/models/gemini-test:generateContent?key=test-key "));
    assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));

    let body_start = raw.find("\r\n\r\n").unwrap() + 4;
    let body: serde_json::Value = serde_json::from_str(&raw[body_start..]).unwrap();
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Summarize the sector health."
    );
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        "You are a management consultant."
    );
    assert_eq!(body["tools"], serde_json::json!([{ "google_search": {} }]));
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    let (base_url, _server) = serve(vec![(429, r#"{"error":"quota"}"#)]).await;

    let err = generator(&base_url)
        .generate(&request(vec![]))
        .await
        .unwrap_err();

    match err {
        AttemptError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn ok_without_text_is_missing_text() {
    let (base_url, _server) = serve(vec![(200, r#"{"candidates":[]}"#)]).await;

    let err = generator(&base_url)
        .generate(&request(vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, AttemptError::MissingText));
}

#[tokio::test]
async fn refused_connection_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = generator(&base_url)
        .generate(&request(vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, AttemptError::Request(_)));
}

#[tokio::test]
async fn resilient_caller_recovers_over_http() {
    let (base_url, server) = serve(vec![
        (503, "unavailable"),
        (200, r#"{"promptFeedback":{}}"#),
        (200, GOOD_BODY),
    ])
    .await;
    let policy = RetryPolicy::new(3, Duration::from_millis(5)).unwrap();
    let caller = ResilientCaller::new(Arc::new(generator(&base_url)), policy);

    let outcome = caller.call(&request(vec![])).await;

    assert_eq!(
        outcome,
        CallOutcome::Text("Palo Alto leads consolidation.".to_string())
    );
    assert_eq!(server.await.unwrap().len(), 3);
}

#[tokio::test]
async fn transport_failure_keeps_api_key_out_of_error_text() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let key = "SUPER-SECRET-KEY";
    let generator = GeminiGenerator::new(key, None).with_base_url(base_url);
    let policy = RetryPolicy::new(1, Duration::from_millis(1)).unwrap();
    let caller = ResilientCaller::new(Arc::new(generator), policy);

    let outcome = caller.call(&request(vec![])).await;

    let CallOutcome::Failed(failure) = outcome else {
        panic!("expected failure");
    };
    assert!(failure.last_error.starts_with("request failed"));
    assert!(!failure.last_error.contains(key));
}
