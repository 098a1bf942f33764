//! Voice Clone HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    CreateVoiceClone, DeleteVoiceClone, GetVoiceCloneStatus, SpeakWithClone, SpeechMode,
    SpeechOutcome, TestVoiceClone,
};
use crate::domain::voice::Emotion;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceCloneRequest {
    pub user_id: String,
    /// base64 WAV 录音
    #[serde(alias = "audioData")]
    pub audio_base64: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceCloneResponse {
    pub user_id: String,
    pub voice_id: Option<String>,
    pub created: bool,
    pub mode: &'static str,
    pub preview_url: Option<String>,
    pub fallback_reason: Option<String>,
    pub created_at: String,
    pub sample_duration_secs: u32,
    pub language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVoiceCloneResponse {
    pub user_id: String,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCloneStatusResponse {
    pub user_id: String,
    pub has_voice_clone: bool,
    pub voice_id: Option<String>,
    pub mode: Option<&'static str>,
    pub created_at: Option<String>,
    pub sample_duration_secs: Option<u32>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequest {
    pub user_id: String,
    pub text: String,
    /// 缺省时随机选择
    #[serde(default)]
    pub emotion: Option<Emotion>,
}

/// 合成结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub audio_url: String,
    pub text: String,
    pub emotion: Emotion,
    pub voice_id: String,
    pub mode: SpeechMode,
    pub used_voice_clone: bool,
    pub fallback_reason: Option<String>,
    pub generated_at: String,
}

impl From<SpeechOutcome> for SpeechResponse {
    fn from(outcome: SpeechOutcome) -> Self {
        Self {
            used_voice_clone: outcome.used_voice_clone(),
            audio_url: outcome.audio_url,
            text: outcome.text,
            emotion: outcome.emotion,
            voice_id: outcome.voice_id,
            mode: outcome.mode,
            fallback_reason: outcome.fallback_reason,
            generated_at: outcome.generated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建音色克隆（已存在时返回现有记录）
pub async fn create_voice_clone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateVoiceCloneRequest>,
) -> Result<Json<ApiResponse<CreateVoiceCloneResponse>>, ApiError> {
    let result = state
        .create_voice_clone_handler
        .handle(CreateVoiceClone {
            user_id: req.user_id,
            audio_base64: req.audio_base64,
        })
        .await?;

    Ok(Json(ApiResponse::success(CreateVoiceCloneResponse {
        user_id: result.user_id,
        voice_id: result.voice_id,
        created: result.created,
        mode: result.mode,
        preview_url: result.preview_url,
        fallback_reason: result.fallback_reason,
        created_at: result.created_at.to_rfc3339(),
        sample_duration_secs: result.sample_duration_secs,
        language: result.language,
    })))
}

/// 删除音色克隆
pub async fn delete_voice_clone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRequest>,
) -> Result<Json<ApiResponse<DeleteVoiceCloneResponse>>, ApiError> {
    let result = state
        .delete_voice_clone_handler
        .handle(DeleteVoiceClone {
            user_id: req.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(DeleteVoiceCloneResponse {
        user_id: result.user_id,
        deleted: result.deleted,
    })))
}

/// 查询音色克隆状态
pub async fn voice_clone_status(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRequest>,
) -> Result<Json<ApiResponse<VoiceCloneStatusResponse>>, ApiError> {
    let status = state
        .voice_clone_status_handler
        .handle(GetVoiceCloneStatus {
            user_id: req.user_id,
        })?;

    Ok(Json(ApiResponse::success(VoiceCloneStatusResponse {
        user_id: status.user_id,
        has_voice_clone: status.has_voice_clone,
        voice_id: status.voice_id,
        mode: status.mode,
        created_at: status.created_at.map(|t| t.to_rfc3339()),
        sample_duration_secs: status.sample_duration_secs,
        language: status.language,
    })))
}

/// 用随机测试语句试听克隆音色
pub async fn test_voice_clone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRequest>,
) -> Result<Json<ApiResponse<SpeechResponse>>, ApiError> {
    let outcome = state
        .test_voice_clone_handler
        .handle(TestVoiceClone {
            user_id: req.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(outcome.into())))
}

/// 用克隆音色朗读文本
pub async fn speak_with_clone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakRequest>,
) -> Result<Json<ApiResponse<SpeechResponse>>, ApiError> {
    let outcome = state
        .speak_with_clone_handler
        .handle(SpeakWithClone {
            user_id: req.user_id,
            text: req.text,
            emotion: req.emotion,
        })
        .await?;

    Ok(Json(ApiResponse::success(outcome.into())))
}
