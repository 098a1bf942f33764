//! Speech Synthesis Port - 语音合成与音色克隆

use async_trait::async_trait;

use crate::domain::job::JobError;
use crate::domain::voice::Emotion;

/// 合成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: String,
    pub speed: f64,
    pub volume: f64,
    pub pitch: i32,
    pub emotion: Emotion,
}

impl SpeechRequest {
    /// 默认参数: 正常语速，音量 1.5，音高 0
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            speed: 1.0,
            volume: 1.5,
            pitch: 0,
            emotion,
        }
    }

    pub fn with_prosody(mut self, speed: f64, pitch: i32) -> Self {
        self.speed = speed;
        self.pitch = pitch;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

/// 音色克隆请求
#[derive(Debug, Clone)]
pub struct VoiceCloneRequest {
    /// base64 编码的 WAV 录音
    pub audio_base64: String,
    /// 提供方侧的自定义音色 ID
    pub custom_voice_id: String,
}

/// Speech Synthesis Port
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// 合成语音，返回音频地址
    async fn synthesize(&self, request: &SpeechRequest) -> Result<String, JobError>;

    /// 克隆音色，成功时返回试听地址（如果提供方给出）
    async fn clone_voice(&self, request: &VoiceCloneRequest) -> Result<Option<String>, JobError>;

    fn is_configured(&self) -> bool {
        true
    }
}
