//! Exercises GroqApiAgent against a local one-shot HTTP server.

use nutriscan_core::assessment::{
    AnalysisError, CompletionBackend, CompletionRequest, SamplingParams,
};
use nutriscan_core::config::ApiConfig;
use nutriscan_interaction::GroqApiAgent;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct CapturedRequest {
    head: String,
    body: serde_json::Value,
}

/// Serves exactly one request with the given status line and JSON body.
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buffer.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending body");
            buffer.extend_from_slice(&chunk[..n]);
        }

        let raw_body = &buffer[header_end..header_end + content_length];
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        CapturedRequest {
            head,
            body: serde_json::from_slice(raw_body).unwrap(),
        }
    });

    (base_url, handle)
}

fn agent_for(base_url: &str, api_key: Option<&str>) -> GroqApiAgent {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ApiConfig::default()
    };
    GroqApiAgent::new(api_key.map(str::to_string), &config).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        prompt: "Screen this child".to_string(),
        image_data_url: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
        sampling: SamplingParams::default(),
    }
}

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_completion_returns_content() {
    let reply = r#"{"riskLevel":"Low","explanation":"Healthy weight","confidence":0.9}"#;
    let (base_url, server) = serve_once("200 OK", completion_body(reply)).await;
    let agent = agent_for(&base_url, Some("gsk_test"));

    let text = agent.complete(request()).await.unwrap();
    assert_eq!(text, reply);

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /chat/completions "));
    assert!(
        captured
            .head
            .lines()
            .any(|line| line.eq_ignore_ascii_case("authorization: Bearer gsk_test"))
    );
    assert_eq!(captured.body["model"], "meta-llama/llama-4-scout-17b-16e-instruct");
    assert_eq!(captured.body["stream"], false);
    assert!(captured.body["stop"].is_null());
    assert_eq!(
        captured.body["messages"][0]["content"][1]["image_url"]["url"],
        "data:image/jpeg;base64,/9j/4AAQ"
    );
}

#[tokio::test]
async fn test_rate_limited_response_classifies() {
    let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#.to_string();
    let (base_url, server) = serve_once("429 Too Many Requests", body).await;
    let agent = agent_for(&base_url, Some("gsk_test"));

    let err = agent.complete(request()).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.status_code, Some(429));
    assert_eq!(AnalysisError::from(err), AnalysisError::RateLimited);
}

#[tokio::test]
async fn test_unauthorized_response_classifies() {
    let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#.to_string();
    let (base_url, server) = serve_once("401 Unauthorized", body).await;
    let agent = agent_for(&base_url, Some("gsk_wrong"));

    let err = agent.complete(request()).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.message, "401 Invalid API Key");
    assert_eq!(AnalysisError::from(err), AnalysisError::Authentication);
}

#[tokio::test]
async fn test_server_error_classifies() {
    let (base_url, server) = serve_once("500 Internal Server Error", "{}".to_string()).await;
    let agent = agent_for(&base_url, Some("gsk_test"));

    let err = agent.complete(request()).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(AnalysisError::from(err), AnalysisError::ServiceUnavailable);
}

#[tokio::test]
async fn test_empty_choices_yield_empty_text() {
    let body = r#"{"id":"chatcmpl-2","choices":[]}"#.to_string();
    let (base_url, server) = serve_once("200 OK", body).await;
    let agent = agent_for(&base_url, Some("gsk_test"));

    let text = agent.complete(request()).await.unwrap();
    server.await.unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn test_missing_api_key_fails_before_sending() {
    let agent = agent_for("http://127.0.0.1:9", None);

    let err = agent.complete(request()).await.unwrap_err();
    assert!(err.status_code.is_none());
    assert_eq!(AnalysisError::from(err), AnalysisError::Authentication);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connectivity() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let agent = agent_for(&format!("http://{}", addr), Some("gsk_test"));
    let err = agent.complete(request()).await.unwrap_err();

    assert!(err.status_code.is_none());
    assert_eq!(AnalysisError::from(err), AnalysisError::Connectivity);
}

#[tokio::test]
async fn test_request_timeout_is_connectivity() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    // Accept the connection and never answer.
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        drop(socket);
    });

    let config = ApiConfig {
        base_url,
        timeout_secs: 1,
        ..ApiConfig::default()
    };
    let agent = GroqApiAgent::new(Some("gsk_test".to_string()), &config).unwrap();

    let started = std::time::Instant::now();
    let err = agent.complete(request()).await.unwrap_err();
    server.abort();

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert!(err.status_code.is_none());
    assert_eq!(err.message, "Groq API request timed out");
    assert_eq!(AnalysisError::from(err), AnalysisError::Connectivity);
}
