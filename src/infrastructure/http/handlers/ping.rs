//! Ping Handler
//!
//! 健康检查，同时报告各外部提供方是否已配置

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// 各提供方的配置情况
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub speech: bool,
    pub narration: bool,
    pub text_generation: bool,
}

/// Ping 响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub services: ServiceStatus,
    pub voice_clones: usize,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        services: ServiceStatus {
            speech: state.speech.is_configured(),
            narration: state.narration.is_configured(),
            text_generation: state.text.is_configured(),
        },
        voice_clones: state.voice_clones.len(),
    })
}
