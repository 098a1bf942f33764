//! Card HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::RecognizeCard;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeCardRequest {
    /// 纯 base64 或 data URL
    #[serde(alias = "imageBase64")]
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeCardResponse {
    /// 卡牌名，或 UNKNOWN / WRONG_CARD / UNRECOGNIZED
    pub card: String,
    pub kind: &'static str,
    pub model: String,
    pub attempts: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// 识别卡牌图片
pub async fn analyze_card(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeCardRequest>,
) -> Result<Json<ApiResponse<AnalyzeCardResponse>>, ApiError> {
    let result = state
        .recognize_card_handler
        .handle(RecognizeCard {
            image_base64: req.image,
        })
        .await?;

    tracing::info!(
        card = %result.label,
        model = %result.model,
        attempts = result.attempts,
        "Card analyzed"
    );

    Ok(Json(ApiResponse::success(AnalyzeCardResponse {
        card: result.label,
        kind: result.kind,
        model: result.model,
        attempts: result.attempts,
    })))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::job::JobError;
    use crate::testing::{post_json, ScriptedVision, TestApp};

    #[tokio::test]
    async fn test_analyze_card() {
        let app = TestApp::new().with_vision(ScriptedVision::answering(&[" the sun\n"]));

        let json = post_json(
            app.router(),
            "/api/card/analyze",
            json!({ "image": "data:image/jpeg;base64,/9j/4AAQ" }),
        )
        .await;

        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["card"], "THE SUN");
        assert_eq!(json["data"]["model"], "haiku");
        assert_eq!(app.vision.models(), vec!["haiku"]);
    }

    #[tokio::test]
    async fn test_analyze_card_accepts_image_base64_alias() {
        let app = TestApp::new().with_vision(ScriptedVision::answering(&["UNKNOWN", "UNKNOWN"]));

        let json = post_json(
            app.router(),
            "/api/card/analyze",
            json!({ "imageBase64": "/9j/4AAQ" }),
        )
        .await;

        assert_eq!(json["data"]["card"], "UNKNOWN");
        assert_eq!(json["data"]["attempts"], 2);
    }

    #[tokio::test]
    async fn test_analyze_card_provider_failure() {
        let app = TestApp::new().with_vision(ScriptedVision::new(vec![Err(JobError::provider(
            "invalid x-api-key",
        ))]));

        let json = post_json(app.router(), "/api/card/analyze", json!({ "image": "/9j/4AAQ" })).await;

        assert_eq!(json["errno"], 502);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_card_requires_image() {
        let app = TestApp::new();

        let json = post_json(app.router(), "/api/card/analyze", json!({ "image": "" })).await;

        assert_eq!(json["errno"], 400);
        assert!(app.vision.models().is_empty());
    }
}
