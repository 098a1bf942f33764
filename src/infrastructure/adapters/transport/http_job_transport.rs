//! HTTP Job Transport - 通过 reqwest 调用提供方
//!
//! 实现 JobTransportPort，每个提供方一个实例，鉴权方式不同:
//! - Wavespeed / RunPod: `Authorization: Bearer <key>`
//! - Anthropic: `x-api-key` + `anthropic-version`

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{JobTransportPort, TransportError};

/// 错误响应体在错误信息中保留的最大长度
const MAX_ERROR_BODY: usize = 500;

/// 提供方鉴权方式
#[derive(Debug, Clone)]
pub enum ProviderAuth {
    None,
    Bearer(String),
    AnthropicKey { api_key: String, version: String },
}

impl ProviderAuth {
    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            ProviderAuth::None => builder,
            ProviderAuth::Bearer(token) => builder.bearer_auth(token),
            ProviderAuth::AnthropicKey { api_key, version } => builder
                .header("x-api-key", api_key)
                .header("anthropic-version", version),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self {
            ProviderAuth::None => false,
            ProviderAuth::Bearer(token) => !token.is_empty(),
            ProviderAuth::AnthropicKey { api_key, .. } => !api_key.is_empty(),
        }
    }
}

/// HTTP 传输配置
#[derive(Debug, Clone)]
pub struct HttpJobTransportConfig {
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
    pub auth: ProviderAuth,
}

impl Default for HttpJobTransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            auth: ProviderAuth::None,
        }
    }
}

impl HttpJobTransportConfig {
    pub fn new(auth: ProviderAuth) -> Self {
        Self {
            auth,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// reqwest 传输
pub struct HttpJobTransport {
    client: Client,
    config: HttpJobTransportConfig,
}

impl HttpJobTransport {
    pub fn new(config: HttpJobTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.auth.is_configured()
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, TransportError> {
        let response = self
            .config
            .auth
            .apply(builder)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::read_json(response).await
    }

    async fn read_json(response: Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Network(format!("Cannot connect to provider: {}", e))
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl JobTransportPort for HttpJobTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        tracing::debug!(url, "POST provider request");
        self.send(self.client.post(url).json(body)).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        tracing::debug!(url, "GET provider status");
        self.send(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn echo_auth(headers: HeaderMap) -> Json<Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "authorization": header("authorization"),
            "x_api_key": header("x-api-key"),
            "version": header("anthropic-version"),
        }))
    }

    #[tokio::test]
    async fn test_bearer_auth_is_sent() {
        let base = serve(Router::new().route("/run", post(|headers: HeaderMap| async move { echo_auth(headers) }))).await;
        let transport = HttpJobTransport::new(HttpJobTransportConfig::new(ProviderAuth::Bearer(
            "secret".to_string(),
        )))
        .unwrap();

        let body = transport
            .post_json(&format!("{}/run", base), &json!({"text": "hi"}))
            .await
            .unwrap();

        assert_eq!(body["authorization"], "Bearer secret");
        assert!(body["x_api_key"].is_null());
    }

    #[tokio::test]
    async fn test_anthropic_headers_are_sent() {
        let base = serve(Router::new().route("/messages", get(|headers: HeaderMap| async move { echo_auth(headers) }))).await;
        let transport = HttpJobTransport::new(HttpJobTransportConfig::new(
            ProviderAuth::AnthropicKey {
                api_key: "k".to_string(),
                version: "2023-06-01".to_string(),
            },
        ))
        .unwrap();

        let body = transport
            .get_json(&format!("{}/messages", base))
            .await
            .unwrap();

        assert_eq!(body["x_api_key"], "k");
        assert_eq!(body["version"], "2023-06-01");
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let base = serve(Router::new().route(
            "/fail",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        ))
        .await;
        let transport = HttpJobTransport::new(HttpJobTransportConfig::default()).unwrap();

        let error = transport
            .get_json(&format!("{}/fail", base))
            .await
            .unwrap_err();

        match error {
            TransportError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let base = serve(Router::new().route("/text", get(|| async { "plain text" }))).await;
        let transport = HttpJobTransport::new(HttpJobTransportConfig::default()).unwrap();

        let error = transport
            .get_json(&format!("{}/text", base))
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Decode(_)));
    }

    #[test]
    fn test_auth_configuration() {
        assert!(!ProviderAuth::None.is_configured());
        assert!(!ProviderAuth::Bearer(String::new()).is_configured());
        assert!(ProviderAuth::Bearer("x".to_string()).is_configured());
    }
}
