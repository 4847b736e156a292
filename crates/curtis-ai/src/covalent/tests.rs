//! HTTP-level tests for the Covalent client against a local mock server.

use std::time::Duration;

use futures_util::StreamExt;
use mockito::Matcher;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::*;
use crate::{AiError, GenerateRequest, InferenceClient};

fn request() -> GenerateRequest {
    GenerateRequest {
        prompt: "<s>[INST] hi [/INST] ".into(),
        max_new_tokens: 275,
    }
}

fn client_for(address: &str, api_key: &str) -> CovalentClient {
    CovalentClient::new(CovalentConfig::new(address).with_api_key(api_key)).unwrap()
}

#[tokio::test]
async fn generate_posts_prompt_and_returns_completion() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_header("x-api-key", "secret")
        .match_body(Matcher::Json(json!({
            "prompt": "<s>[INST] hi [/INST] ",
            "max_new_tokens": 275
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#""<s>[INST] hi [/INST] Bot: Hello!""#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "secret");
    let completion = client.generate(&request()).await.unwrap();

    assert_eq!(completion, "<s>[INST] hi [/INST] Bot: Hello!");
    mock.assert_async().await;
}

#[tokio::test]
async fn no_api_key_header_without_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_header("x-api-key", Matcher::Missing)
        .with_status(200)
        .with_body(r#""ok""#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "");
    client.generate(&request()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn address_is_trimmed_and_trailing_slash_dropped() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#""ok""#)
        .create_async()
        .await;

    let client = client_for(&format!("  {}/ ", server.url()), "");
    assert_eq!(client.generate(&request()).await.unwrap(), "ok");

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/generate")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_for(&server.url(), "");
    let err = client.generate(&request()).await.unwrap_err();

    match err {
        AiError::ApiError(msg) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("boom"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn non_string_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{"text": "not a bare string"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "");
    let err = client.generate(&request()).await.unwrap_err();

    assert!(matches!(err, AiError::ParseError(_)));
}

#[tokio::test]
async fn missing_address_fails_without_a_request() {
    let client = client_for("   ", "");
    assert!(matches!(
        client.generate(&request()).await,
        Err(AiError::MissingAddress)
    ));
    assert!(matches!(
        client.stream(&request()).await,
        Err(AiError::MissingAddress)
    ));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let client = CovalentClient::new(
        CovalentConfig::new("http://127.0.0.1:9").with_connect_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.generate(&request()).await.unwrap_err();
    assert!(matches!(err, AiError::NetworkError(_) | AiError::Timeout));
}

#[tokio::test]
async fn stream_yields_body_bytes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/stream")
        .match_header("x-api-key", "secret")
        .match_body(Matcher::PartialJson(json!({"max_new_tokens": 275})))
        .with_status(200)
        .with_body("Hello there, eh!")
        .create_async()
        .await;

    let client = client_for(&server.url(), "secret");
    let chunks: Vec<_> = client.stream(&request()).await.unwrap().collect().await;

    let body: Vec<u8> = chunks
        .into_iter()
        .flat_map(|chunk| chunk.unwrap())
        .collect();
    assert_eq!(body, b"Hello there, eh!");
    mock.assert_async().await;
}

/// Serve one chunked `/stream` reply, waiting the given delay before each chunk.
async fn trickle_server(chunks: Vec<(Duration, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // The JSON body is the last thing the client sends.
        while !request.ends_with(b"}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ntransfer-encoding: chunked\r\n\r\n",
            )
            .await
            .unwrap();
        for (delay, text) in chunks {
            tokio::time::sleep(delay).await;
            let frame = format!("{:x}\r\n{text}\r\n", text.len());
            if socket.write_all(frame.as_bytes()).await.is_err() {
                return;
            }
        }
        let _ = socket.write_all(b"0\r\n\r\n").await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn live_stream_may_outlast_stream_timeout() {
    let gap = Duration::from_millis(250);
    let address = trickle_server(vec![
        (gap, "tok0 "),
        (gap, "tok1 "),
        (gap, "tok2 "),
        (gap, "tok3 "),
        (gap, "tok4 "),
        (gap, "tok5 "),
    ])
    .await;
    let client = CovalentClient::new(
        CovalentConfig::new(address).with_stream_timeout(Duration::from_millis(600)),
    )
    .unwrap();

    let chunks: Vec<_> = client.stream(&request()).await.unwrap().collect().await;

    let body: Vec<u8> = chunks
        .into_iter()
        .flat_map(|chunk| chunk.unwrap())
        .collect();
    assert_eq!(body, b"tok0 tok1 tok2 tok3 tok4 tok5 ");
}

#[tokio::test]
async fn silent_stream_ends_after_one_timeout() {
    let address = trickle_server(vec![
        (Duration::ZERO, "tok0 "),
        (Duration::from_secs(3), "late"),
    ])
    .await;
    let client = CovalentClient::new(
        CovalentConfig::new(address).with_stream_timeout(Duration::from_millis(300)),
    )
    .unwrap();

    let stream = client.stream(&request()).await.unwrap();
    let chunks = tokio::time::timeout(Duration::from_secs(2), stream.collect::<Vec<_>>())
        .await
        .expect("stream should end once the read times out");

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].as_deref().unwrap(), b"tok0 ");
    assert!(matches!(chunks[1], Err(AiError::Timeout)));
}

#[tokio::test]
async fn stream_rejected_status_is_error_before_streaming() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/stream")
        .with_status(403)
        .create_async()
        .await;

    let client = client_for(&server.url(), "wrong");
    let result = client.stream(&request()).await;

    assert!(matches!(result, Err(AiError::ApiError(_))));
}

#[test]
fn debug_redacts_api_key() {
    let config = CovalentConfig::new("http://x").with_api_key("hunter2");
    let debug = format!("{config:?}");
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn blank_api_key_is_dropped() {
    let config = CovalentConfig::new("http://x").with_api_key("  ");
    assert_eq!(config.api_key, None);
}
