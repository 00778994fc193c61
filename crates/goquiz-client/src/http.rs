//! HTTP transport for the authentication and mail service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;

use goquiz_core::error::ActionError;
use goquiz_core::traits::{Method, RemoteRequest, Transport};

/// JSON-over-HTTP [`Transport`].
pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send_error(&self, e: reqwest::Error) -> ActionError {
        if e.is_timeout() {
            ActionError::Timeout(self.timeout_secs)
        } else {
            ActionError::Network(e.to_string())
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Pull a display-ready message out of an error body: `message`, else `error`.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(method = %request.method, endpoint = %request.endpoint))]
    async fn send(&self, request: &RemoteRequest) -> Result<serde_json::Value, ActionError> {
        let url = format!("{}{}", self.base_url, request.endpoint);
        let mut req = self.client.request(to_reqwest(request.method), url);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        if request.method != Method::Get {
            req = req.json(&request.body);
        }

        let response = req.send().await.map_err(|e| self.send_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.send_error(e))?;
        tracing::debug!(status, "response received");

        if status == 401 {
            return Err(ActionError::Unauthorized(extract_message(&body)));
        }
        if status >= 400 {
            return Err(ActionError::Server {
                status,
                message: extract_message(&body),
            });
        }

        // Mail endpoints commonly answer with an empty 200.
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ActionError::Decode(format!("response is not JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn login_request() -> RemoteRequest {
        RemoteRequest {
            method: Method::Post,
            endpoint: "/api/auth/login".into(),
            body: json!({"email": "a@b.com", "password": "longenough"}),
        }
    }

    #[tokio::test]
    async fn successful_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_json(json!({"email": "a@b.com", "password": "longenough"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"name": "Ada", "email": "a@b.com", "token": "t"})),
            )
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&format!("{}/", server.uri()), Some("test-key".into()), 5).unwrap();
        let body = transport.send(&login_request()).await.unwrap();
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["token"], "t");
    }

    #[tokio::test]
    async fn unauthorized_carries_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Wrong password"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None, 5).unwrap();
        let err = transport.send(&login_request()).await.unwrap_err();
        assert_eq!(err, ActionError::Unauthorized(Some("Wrong password".into())));
        assert_eq!(err.display_message(), "Wrong password");
    }

    #[tokio::test]
    async fn error_field_used_when_message_missing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"error": "Email already taken"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None, 5).unwrap();
        let err = transport.send(&login_request()).await.unwrap_err();
        assert_eq!(
            err,
            ActionError::Server {
                status: 409,
                message: Some("Email already taken".into())
            }
        );
    }

    #[tokio::test]
    async fn plain_text_error_falls_back_to_generic_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None, 5).unwrap();
        let err = transport.send(&login_request()).await.unwrap_err();
        assert!(matches!(err, ActionError::Server { status: 500, message: None }));
        assert_eq!(err.display_message(), goquiz_core::error::GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn non_json_success_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None, 5).unwrap();
        let err = transport.send(&login_request()).await.unwrap_err();
        assert!(matches!(err, ActionError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_success_is_null() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/mail/send"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None, 5).unwrap();
        let request = RemoteRequest {
            method: Method::Post,
            endpoint: "/api/mail/send".into(),
            body: json!({"to": "a@b.com", "subject": "s", "html": "<p/>"}),
        };
        assert_eq!(transport.send(&request).await.unwrap(), serde_json::Value::Null);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None, 1).unwrap();
        let err = transport.send(&login_request()).await.unwrap_err();
        assert_eq!(err, ActionError::Timeout(1));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let transport = HttpTransport::new("http://127.0.0.1:1", None, 5).unwrap();
        let err = transport.send(&login_request()).await.unwrap_err();
        assert!(matches!(err, ActionError::Network(_)));
    }

    #[test]
    fn extracts_messages() {
        assert_eq!(extract_message(r#"{"message":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(
            extract_message(r#"{"message":"  ","error":"bad"}"#).as_deref(),
            Some("bad")
        );
        assert_eq!(extract_message("not json"), None);
        assert_eq!(extract_message(r#"{"message": 3}"#), None);
    }
}
