//! Quiz HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{AnswerQuizQuestion, CharacterAnswer, ListCharacters, PregenerateQuizAnswers};
use crate::domain::voice::Emotion;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub personality: &'static str,
    pub voice_id: &'static str,
    pub speed: f64,
    pub pitch: i32,
    pub emotion: Emotion,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerQuestionRequest {
    pub character: String,
    pub question: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerQuestionResponse {
    pub question: String,
    #[serde(flatten)]
    pub answer: CharacterAnswer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PregenerateRequest {
    pub question: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    /// 客户端缓存的克隆音色 ID
    #[serde(default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PregenerateResponse {
    pub question: String,
    pub user_id: String,
    pub generation_time_ms: u64,
    pub total_characters: usize,
    pub successful: usize,
    pub answers: Vec<CharacterAnswer>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出测验角色
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<CharacterSummary>>> {
    let characters = state
        .list_characters_handler
        .handle(ListCharacters)
        .iter()
        .map(|c| CharacterSummary {
            id: c.id,
            name: c.name,
            emoji: c.emoji,
            personality: c.personality,
            voice_id: c.available_voice_id(),
            speed: c.voice.speed,
            pitch: c.voice.pitch,
            emotion: c.voice.emotion,
        })
        .collect();

    Json(ApiResponse::success(characters))
}

/// 单个角色回答问题
pub async fn answer_quiz_question(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnswerQuestionRequest>,
) -> Result<Json<ApiResponse<AnswerQuestionResponse>>, ApiError> {
    let result = state
        .answer_quiz_handler
        .handle(AnswerQuizQuestion {
            character: req.character,
            question: req.question,
            user_name: req.user_name,
        })
        .await?;

    Ok(Json(ApiResponse::success(AnswerQuestionResponse {
        question: result.question,
        answer: result.answer,
    })))
}

/// 所有角色预生成回答
pub async fn pregenerate_quiz_answers(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PregenerateRequest>,
) -> Result<Json<ApiResponse<PregenerateResponse>>, ApiError> {
    let result = state
        .pregenerate_quiz_handler
        .handle(PregenerateQuizAnswers {
            question: req.question,
            user_id: req.user_id,
            user_name: req.user_name,
            voice_id: req.voice_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(PregenerateResponse {
        question: result.question,
        user_id: result.user_id,
        generation_time_ms: result.generation_time_ms,
        total_characters: result.answers.len(),
        successful: result.answers.iter().filter(|a| a.success).count(),
        answers: result.answers,
    })))
}
