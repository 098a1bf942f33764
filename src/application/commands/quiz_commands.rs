//! Quiz Commands - 角色测验回答

use serde::Serialize;

/// 单个角色回答测验问题
#[derive(Debug, Clone)]
pub struct AnswerQuizQuestion {
    pub character: String,
    pub question: String,
    pub user_name: Option<String>,
}

/// 所有角色并发预生成回答（文本 + 语音）
#[derive(Debug, Clone)]
pub struct PregenerateQuizAnswers {
    pub question: String,
    pub user_id: String,
    pub user_name: Option<String>,
    /// 客户端已知的克隆音色 ID，用户尚无记录时登记
    pub voice_id: Option<String>,
}

/// 回答文本的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Generated,
    Fallback,
}

/// 单个角色的回答
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAnswer {
    pub character: &'static str,
    pub emoji: &'static str,
    pub personality: &'static str,
    pub answer: String,
    pub answer_source: AnswerSource,
    pub audio_url: Option<String>,
    pub used_voice_clone: bool,
    pub success: bool,
    pub error: Option<String>,
}

/// 单个角色回答响应
#[derive(Debug, Clone)]
pub struct AnswerQuizQuestionResponse {
    pub question: String,
    pub answer: CharacterAnswer,
}

/// 预生成响应
#[derive(Debug, Clone)]
pub struct PregenerateQuizAnswersResponse {
    pub question: String,
    pub user_id: String,
    pub generation_time_ms: u64,
    pub answers: Vec<CharacterAnswer>,
}
