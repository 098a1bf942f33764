//! Job Transport Port - 远程任务的 HTTP 传输抽象
//!
//! 鉴权头、超时等细节由具体实现负责，任务客户端只看到 JSON

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 传输错误
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Job Transport Port
#[async_trait]
pub trait JobTransportPort: Send + Sync {
    /// POST JSON 请求体，返回解析后的 JSON 响应
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;

    /// GET 状态地址
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}
