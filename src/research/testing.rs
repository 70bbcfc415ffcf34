//! In-memory search and model fakes that record every call, plus a one-shot
//! local HTTP server for exercising the real clients.

use super::model_client::LanguageModel;
use super::search_client::SearchProvider;
use super::types::{ResultSnippet, SearchResponse};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Search provider returning one organic snippet, or failing every call
pub struct FakeSearch {
    response: Result<SearchResponse, String>,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn with_snippet(snippet: &str) -> Self {
        Self {
            response: Ok(SearchResponse {
                organic_results: vec![ResultSnippet {
                    snippet: Some(snippet.to_string()),
                }],
                ..Default::default()
            }),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        self.response.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

/// Model answering company prompts and role prompts with fixed texts
pub struct FakeModel {
    company_reply: Result<String, String>,
    role_reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn new(company_reply: &str, role_reply: &str) -> Self {
        Self {
            company_reply: Ok(company_reply.to_string()),
            role_reply: Ok(role_reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            company_reply: Err(message.to_string()),
            role_reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        // lets concurrent callers interleave like a real network call would
        tokio::task::yield_now().await;
        // Role prompts name the company after " at '"
        let reply = if prompt.contains("' at '") {
            &self.role_reply
        } else {
            &self.company_reply
        };
        reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

/// Answer exactly one HTTP request with `status` and a JSON `body`. Returns
/// the base URL to point a client at and a handle yielding the raw request.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (base_url, handle)
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    base_url
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).into_owned()
}
