//! Wavespeed Speech Client
//!
//! 实现 SpeechSynthesisPort，请求都经过 RemoteJobClient:
//! POST {speech_url} / {clone_url}，响应带 `data` 外层，异步任务通过 `urls.get` 轮询

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::jobs::RemoteJobClient;
use crate::application::ports::{SpeechRequest, SpeechSynthesisPort, VoiceCloneRequest};
use crate::domain::job::{JobError, JobRequest, PollPolicy};

pub const DEFAULT_SPEECH_URL: &str = "https://api.wavespeed.ai/api/v3/minimax/speech-02-hd";
pub const DEFAULT_CLONE_URL: &str = "https://api.wavespeed.ai/api/v3/minimax/voice-clone";

/// 克隆完成后提供方用来生成试听音频的文本
const CLONE_PREVIEW_TEXT: &str =
    "Hallo! Das ist meine geklonte Stimme. Ich kann jetzt alle Texte mit meiner eigenen Stimme sprechen!";

/// Wavespeed 客户端配置
#[derive(Debug, Clone)]
pub struct WavespeedConfig {
    pub speech_url: String,
    pub clone_url: String,
    pub speech_poll: PollPolicy,
    pub clone_poll: PollPolicy,
    pub sample_rate: u32,
    pub bitrate: u32,
    pub clone_accuracy: f64,
    /// 是否配置了 API key
    pub enabled: bool,
}

impl Default for WavespeedConfig {
    fn default() -> Self {
        Self {
            speech_url: DEFAULT_SPEECH_URL.to_string(),
            clone_url: DEFAULT_CLONE_URL.to_string(),
            speech_poll: PollPolicy::new(1000, 30),
            clone_poll: PollPolicy::new(2000, 30),
            sample_rate: 44100,
            bitrate: 128000,
            clone_accuracy: 0.7,
            enabled: true,
        }
    }
}

/// Wavespeed MiniMax 客户端
pub struct WavespeedSpeechClient {
    jobs: Arc<RemoteJobClient>,
    config: WavespeedConfig,
    shutdown: CancellationToken,
}

impl WavespeedSpeechClient {
    pub fn new(jobs: Arc<RemoteJobClient>, config: WavespeedConfig, shutdown: CancellationToken) -> Self {
        Self {
            jobs,
            config,
            shutdown,
        }
    }
}

#[async_trait]
impl SpeechSynthesisPort for WavespeedSpeechClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<String, JobError> {
        let payload = json!({
            "text": request.text,
            "voice_id": request.voice_id,
            "speed": request.speed,
            "volume": request.volume,
            "pitch": request.pitch,
            "emotion": request.emotion.as_str(),
            "sample_rate": self.config.sample_rate,
            "bitrate": self.config.bitrate,
            "english_normalization": false,
        });
        let job = JobRequest::new(&self.config.speech_url, payload).with_label("wavespeed-tts");

        tracing::debug!(
            voice_id = %request.voice_id,
            emotion = %request.emotion,
            text_len = request.text.len(),
            "Wavespeed synthesis"
        );

        self.jobs
            .run(&job, self.config.speech_poll, &self.shutdown)
            .await
            .into_result()
    }

    async fn clone_voice(&self, request: &VoiceCloneRequest) -> Result<Option<String>, JobError> {
        let payload = json!({
            "audio": format!("data:audio/wav;base64,{}", request.audio_base64),
            "custom_voice_id": request.custom_voice_id,
            "model": "speech-02-hd",
            "need_noise_reduction": false,
            "need_volume_normalization": true,
            "accuracy": self.config.clone_accuracy,
            "text": CLONE_PREVIEW_TEXT,
        });
        let job = JobRequest::new(&self.config.clone_url, payload)
            .with_label("wavespeed-clone")
            .with_optional_artifact();

        tracing::info!(custom_voice_id = %request.custom_voice_id, "Wavespeed voice clone");

        let preview = self
            .jobs
            .run(&job, self.config.clone_poll, &self.shutdown)
            .await
            .into_result()?;

        Ok(Some(preview).filter(|p| !p.is_empty()))
    }

    fn is_configured(&self) -> bool {
        self.config.enabled
    }
}
