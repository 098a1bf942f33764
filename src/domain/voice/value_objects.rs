//! Voice Context - Value Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 标准女声，克隆不可用时的兜底音色
pub const STANDARD_VOICE_ID: &str = "German_SweetLady";

/// 克隆音色的默认语言
pub const DEFAULT_LANGUAGE: &str = "de";

/// 录音样本的默认时长（秒）
pub const DEFAULT_SAMPLE_DURATION_SECS: u32 = 10;

/// 用户音色嵌入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceEmbedding {
    /// Wavespeed MiniMax 克隆出的音色
    WavespeedMinimax {
        voice_id: String,
        #[serde(default)]
        preview_url: Option<String>,
    },
    /// 克隆不可用时由录音样本派生的确定性嵌入
    Mock { hash: i32 },
}

impl VoiceEmbedding {
    /// 从录音样本生成 Mock 嵌入（同样的录音总是得到同样的结果）
    pub fn mock_from_sample(audio_base64: &str) -> Self {
        VoiceEmbedding::Mock {
            hash: sample_hash(audio_base64),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            VoiceEmbedding::WavespeedMinimax { .. } => "wavespeed_minimax",
            VoiceEmbedding::Mock { .. } => "mock",
        }
    }

    /// 可直接用于合成的克隆音色 ID
    pub fn voice_id(&self) -> Option<&str> {
        match self {
            VoiceEmbedding::WavespeedMinimax { voice_id, .. } => Some(voice_id),
            VoiceEmbedding::Mock { .. } => None,
        }
    }
}

/// 已保存的用户音色克隆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCloneRecord {
    pub embedding: VoiceEmbedding,
    pub created_at: DateTime<Utc>,
    pub sample_duration_secs: u32,
    pub language: String,
}

impl VoiceCloneRecord {
    pub fn new(embedding: VoiceEmbedding) -> Self {
        Self {
            embedding,
            created_at: Utc::now(),
            sample_duration_secs: DEFAULT_SAMPLE_DURATION_SECS,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// 按用户 ID 生成 Wavespeed 自定义音色 ID
///
/// 取用户 ID 前 8 个字符并去掉 `-`
pub fn custom_voice_id(user_id: &str) -> String {
    let prefix: String = user_id.chars().take(8).filter(|c| *c != '-').collect();
    format!("WaveUser{}", prefix)
}

/// 个性化合成参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalizedVoice {
    /// 0.9 ~ 1.2
    pub speed: f64,
    /// -2 ~ +2
    pub pitch: i32,
}

impl PersonalizedVoice {
    pub fn from_hash(hash: i32) -> Self {
        let speed = 0.9 + embedding_component(hash, 1) * 0.3;
        let pitch = (-2.0 + embedding_component(hash, 2) * 4.0).round() as i32;
        Self { speed, pitch }
    }
}

/// 录音样本前 20 个字符的 31 进制滚动哈希
fn sample_hash(audio_base64: &str) -> i32 {
    audio_base64.chars().take(20).fold(0i32, |hash, c| {
        hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32)
    })
}

/// 由哈希派生的第 `index` 个分量，取值 [0, 1)
fn embedding_component(hash: i32, index: u32) -> f64 {
    let seed = f64::from(hash) + f64::from(index);
    ((seed.sin() * 10000.0) % 1.0).abs()
}
