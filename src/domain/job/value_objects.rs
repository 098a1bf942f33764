//! Job Context - Value Objects

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// 远程任务请求
#[derive(Debug, Clone)]
pub struct JobRequest {
    /// 提交地址（POST）
    pub endpoint: String,
    /// 提供方相关的请求体，对任务客户端不透明
    pub payload: Value,
    /// 日志标签
    pub label: String,
    /// 提供方只返回任务 id 时，用于拼接状态查询地址: `{status_base}/{id}`
    pub status_base: Option<String>,
    /// 为 true 时，`completed` 但没有产物也算成功（产物为空串）
    pub artifact_optional: bool,
}

impl JobRequest {
    pub fn new(endpoint: impl Into<String>, payload: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload,
            label: "job".to_string(),
            status_base: None,
            artifact_optional: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_status_base(mut self, base: impl Into<String>) -> Self {
        self.status_base = Some(base.into());
        self
    }

    pub fn with_optional_artifact(mut self) -> Self {
        self.artifact_optional = true;
        self
    }
}

/// 异步任务句柄
///
/// 只在一次调用期间存在，不持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    /// 提供方分配的任务 ID
    pub id: String,
    /// 状态查询地址
    pub status_url: String,
    /// 见 `JobRequest::artifact_optional`
    pub artifact_optional: bool,
    pub created_at: DateTime<Utc>,
}

impl JobHandle {
    pub fn new(id: impl Into<String>, status_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status_url: status_url.into(),
            artifact_optional: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_optional_artifact(mut self, optional: bool) -> Self {
        self.artifact_optional = optional;
        self
    }
}

/// 任务失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobFailure {
    /// 网络错误 / 非 2xx / HTTP 超时
    #[error("Transport error: {0}")]
    Transport(String),

    /// 提供方明确报告 failed / error
    #[error("Provider error: {0}")]
    Provider(String),

    /// 响应既不是直接结果也不是异步任务
    #[error("Unrecognized response: {0}")]
    UnrecognizedResponse(String),
}

impl JobFailure {
    /// 是否属于传输类失败
    pub fn is_transport_class(&self) -> bool {
        matches!(
            self,
            JobFailure::Transport(_) | JobFailure::UnrecognizedResponse(_)
        )
    }
}

/// submit 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 提供方同步返回了结果，无需轮询
    Succeeded(String),
    /// 提供方返回了任务句柄
    Pending(JobHandle),
    Failed(JobFailure),
}

/// 任务终态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResult {
    /// 产物引用（URL / base64 / 文本），不解析其内容
    Succeeded(String),
    Failed(JobFailure),
    TimedOut,
    Cancelled,
}

impl JobResult {
    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Succeeded(_))
    }

    pub fn into_result(self) -> Result<String, JobError> {
        match self {
            JobResult::Succeeded(artifact) => Ok(artifact),
            JobResult::Failed(failure) => Err(JobError::Failed(failure)),
            JobResult::TimedOut => Err(JobError::TimedOut),
            JobResult::Cancelled => Err(JobError::Cancelled),
        }
    }
}

/// 供 `?` 传播使用的任务错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error(transparent)]
    Failed(#[from] JobFailure),

    #[error("Job timed out")]
    TimedOut,

    #[error("Job cancelled")]
    Cancelled,
}

impl JobError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Failed(JobFailure::Transport(message.into()))
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Failed(JobFailure::Provider(message.into()))
    }

    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self::Failed(JobFailure::UnrecognizedResponse(message.into()))
    }

    /// 换一个提供方/模型重试是否有意义
    ///
    /// 提供方业务失败和取消不可恢复，必须原样上报
    pub fn is_recoverable(&self) -> bool {
        match self {
            JobError::Failed(failure) => failure.is_transport_class(),
            JobError::TimedOut => true,
            JobError::Cancelled => false,
        }
    }
}

/// 轮询策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// 两次轮询之间的间隔
    pub interval: Duration,
    /// 最多轮询次数，耗尽即 TimedOut
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn new(interval_ms: u64, max_attempts: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            max_attempts,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(1000, 30)
    }
}
