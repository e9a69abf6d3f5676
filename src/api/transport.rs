//! GraphQL transports
//!
//! The client only needs "send this request, give me the JSON body back";
//! the HTTP transport is the production implementation.

use crate::{ChurrosGraphsError, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding an optional API token
pub const TOKEN_ENV_VAR: &str = "CHURROS_TOKEN";

/// A named GraphQL request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    pub operation_name: String,
    pub variables: Value,
}

/// Sends GraphQL requests and returns the raw response body
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn send(&self, request: &GraphQLRequest) -> Result<Value>;
}

/// JSON-over-HTTP POST transport
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::USER_AGENT,
                    header::HeaderValue::from_static(concat!(
                        "churros-graphs/",
                        env!("CARGO_PKG_VERSION")
                    )),
                );
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            auth_token: std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn send(&self, request: &GraphQLRequest) -> Result<Value> {
        debug!(
            endpoint = %self.endpoint,
            operation = %request.operation_name,
            "Sending GraphQL request"
        );

        let mut http_request = self.client.post(&self.endpoint).json(request);
        if let Some(ref token) = self.auth_token {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(ChurrosGraphsError::Transport(format!(
            "HTTP {} from {}: {}",
            status, self.endpoint, error_body
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with `status_line` and a JSON `body`
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request_complete(&request) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/graphql", addr)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..end]);
        let length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= end + 4 + length
    }

    fn local_transport(endpoint: String) -> HttpTransport {
        HttpTransport {
            client: Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            endpoint,
            auth_token: None,
        }
    }

    fn request() -> GraphQLRequest {
        GraphQLRequest {
            query: "query NS_Groups { groups { name } }".to_string(),
            operation_name: "NS_Groups".to_string(),
            variables: json!({}),
        }
    }

    #[tokio::test]
    async fn test_any_2xx_is_accepted() {
        let endpoint = serve_once("201 Created", r#"{"data":{"groups":[]}}"#).await;
        let body = local_transport(endpoint).send(&request()).await.unwrap();
        assert_eq!(body, json!({"data": {"groups": []}}));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let endpoint = serve_once("502 Bad Gateway", r#"{"error":"upstream"}"#).await;
        let result = local_transport(endpoint).send(&request()).await;
        assert!(matches!(
            result,
            Err(ChurrosGraphsError::Transport(msg)) if msg.contains("502") && msg.contains("upstream")
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = GraphQLRequest {
            query: "query ChurrosGraphs_Memberships { groups { name } }".to_string(),
            operation_name: "ChurrosGraphs_Memberships".to_string(),
            variables: json!({"types": ["Club"]}),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["operationName"], "ChurrosGraphs_Memberships");
        assert_eq!(body["variables"]["types"][0], "Club");
        assert!(body.get("operation_name").is_none());
    }

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new("https://churros.inpt.fr/graphql", Duration::from_secs(5))
            .expect("Failed to create transport")
            .with_token("secret");
        assert_eq!(transport.endpoint(), "https://churros.inpt.fr/graphql");
        assert!(transport.is_authenticated());
    }
}
