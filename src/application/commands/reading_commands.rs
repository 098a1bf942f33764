//! Reading Commands - 塔罗解读朗读

use serde::Serialize;

use crate::domain::reading::SpreadType;

/// 生成解读命令
#[derive(Debug, Clone)]
pub struct GenerateReading {
    pub cards: Vec<String>,
    pub spread: SpreadType,
    /// 朗读风格，缺省为 mystical
    pub voice_style: Option<String>,
}

/// 解读中的一段
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSegment {
    pub text: String,
    /// 朗读失败时为 None
    pub audio_url: Option<String>,
}

/// 生成解读响应
#[derive(Debug, Clone)]
pub struct GenerateReadingResponse {
    pub spread: SpreadType,
    pub cards: Vec<String>,
    pub text: String,
    pub segments: Vec<ReadingSegment>,
    /// 每一段都有音频
    pub fully_narrated: bool,
}
