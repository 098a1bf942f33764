//! HTTP Error Handling
//!
//! 业务错误一律返回 HTTP 200，错误信息放在 `{errno, error, data}` 信封里

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const UPSTREAM_ERROR: i32 = 502;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    /// 外部服务（模型、语音提供方）失败
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg)
            }
            ApiError::Upstream(msg) => {
                tracing::error!(errno = errno::UPSTREAM_ERROR, error = %msg, "Upstream service failed");
                ErrorResponse::new(errno::UPSTREAM_ERROR, msg)
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::ExternalServiceError(msg) => ApiError::Upstream(msg),
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_errors_use_envelope_with_200() {
        let response = ApiError::BadRequest("userId is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "userId is required");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_application_error_mapping() {
        let error: ApiError = ApplicationError::from(JobError::TimedOut).into();
        let json = body_json(error.into_response()).await;
        assert_eq!(json["errno"], errno::UPSTREAM_ERROR);

        let error: ApiError = ApplicationError::not_found("VoiceClone", "u1").into();
        let json = body_json(error.into_response()).await;
        assert_eq!(json["errno"], errno::NOT_FOUND);
        assert_eq!(json["error"], "VoiceClone not found: u1");
    }
}
