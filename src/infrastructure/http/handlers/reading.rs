//! Tarot Reading HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{GenerateReading, ReadingSegment};
use crate::domain::reading::SpreadType;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRequest {
    pub cards: Vec<String>,
    #[serde(default, alias = "spreadType")]
    pub spread: SpreadType,
    #[serde(default)]
    pub voice_style: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingResponse {
    pub spread: SpreadType,
    pub cards: Vec<String>,
    pub text: String,
    pub segments: Vec<ReadingSegment>,
    pub fully_narrated: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// 生成并朗读塔罗解读
pub async fn generate_reading(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReadingRequest>,
) -> Result<Json<ApiResponse<ReadingResponse>>, ApiError> {
    let result = state
        .generate_reading_handler
        .handle(GenerateReading {
            cards: req.cards,
            spread: req.spread,
            voice_style: req.voice_style,
        })
        .await?;

    Ok(Json(ApiResponse::success(ReadingResponse {
        spread: result.spread,
        cards: result.cards,
        text: result.text,
        segments: result.segments,
        fully_narrated: result.fully_narrated,
    })))
}
