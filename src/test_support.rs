//! Helpers shared by the unit tests: in-process stub servers and hand-built
//! multipart bodies.

use axum::{body::Body, http::Request, Router};

use crate::config::{Config, DEFAULT_GROQ_MODEL, DEFAULT_MAX_UPLOAD_BYTES};

pub const BOUNDARY: &str = "relay-test-boundary";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(imgbb_api_url: &str, groq_api_url: &str) -> Config {
    Config {
        port: 0,
        imgbb_api_key: Some("imgbb_test_key".to_string()),
        imgbb_api_url: imgbb_api_url.to_string(),
        groq_api_key: Some("groq_test_key".to_string()),
        groq_api_url: groq_api_url.to_string(),
        groq_model: DEFAULT_GROQ_MODEL.to_string(),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
}

/// One-part multipart body. `filename: None` produces a plain form value.
pub fn multipart_body(name: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(filename) => format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n",
            name, filename
        ),
        None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", name),
    };

    let mut body = format!("--{}\r\n{}\r\n", BOUNDARY, disposition).into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
