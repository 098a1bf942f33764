//! Voice Clone Commands - 用户音色克隆

use chrono::{DateTime, Utc};

use crate::domain::voice::Emotion;

/// 创建音色克隆命令
#[derive(Debug, Clone)]
pub struct CreateVoiceClone {
    pub user_id: String,
    /// base64 编码的 WAV 录音（约 10 秒）
    pub audio_base64: String,
}

/// 创建音色克隆响应
#[derive(Debug, Clone)]
pub struct CreateVoiceCloneResponse {
    pub user_id: String,
    /// 克隆成功时的提供方音色 ID
    pub voice_id: Option<String>,
    /// 是否本次新建（已存在时为 false）
    pub created: bool,
    /// existing / wavespeed_minimax / mock
    pub mode: &'static str,
    pub preview_url: Option<String>,
    /// 退化为 Mock 嵌入的原因
    pub fallback_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sample_duration_secs: u32,
    pub language: String,
}

/// 删除音色克隆命令
#[derive(Debug, Clone)]
pub struct DeleteVoiceClone {
    pub user_id: String,
}

/// 删除音色克隆响应
#[derive(Debug, Clone)]
pub struct DeleteVoiceCloneResponse {
    pub user_id: String,
    pub deleted: bool,
}

/// 用随机测试语句试听克隆音色
#[derive(Debug, Clone)]
pub struct TestVoiceClone {
    pub user_id: String,
}

/// 用克隆音色朗读文本
#[derive(Debug, Clone)]
pub struct SpeakWithClone {
    pub user_id: String,
    pub text: String,
    /// None 时随机选择
    pub emotion: Option<Emotion>,
}
