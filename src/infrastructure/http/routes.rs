//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                   GET   健康检查（含各提供方是否已配置）
//! - /api/card/analyze           POST  识别卡牌图片
//! - /api/voice-clone/create     POST  创建音色克隆
//! - /api/voice-clone/delete     POST  删除音色克隆
//! - /api/voice-clone/status     POST  查询音色克隆
//! - /api/voice-clone/test       POST  用随机测试语句试听
//! - /api/voice-clone/speak      POST  用克隆音色朗读文本
//! - /api/quiz/characters        GET   列出测验角色
//! - /api/quiz/answer            POST  单个角色回答
//! - /api/quiz/pregenerate       POST  所有角色预生成回答
//! - /api/tarot/reading          POST  生成并朗读塔罗解读

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/card/analyze", post(handlers::analyze_card))
        .nest("/voice-clone", voice_clone_routes())
        .nest("/quiz", quiz_routes())
        .route("/tarot/reading", post(handlers::generate_reading))
}

/// Voice Clone 路由
fn voice_clone_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_voice_clone))
        .route("/delete", post(handlers::delete_voice_clone))
        .route("/status", post(handlers::voice_clone_status))
        .route("/test", post(handlers::test_voice_clone))
        .route("/speak", post(handlers::speak_with_clone))
}

/// Quiz 路由
fn quiz_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/characters", get(handlers::list_characters))
        .route("/answer", post(handlers::answer_quiz_question))
        .route("/pregenerate", post(handlers::pregenerate_quiz_answers))
}
