//! RunPod Chatterbox Client
//!
//! POST {base_url}/runsync；排队中的任务只返回 id，通过 `{base_url}/status/{id}` 轮询

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::jobs::RemoteJobClient;
use crate::application::ports::{NarrationPort, NarrationRequest};
use crate::domain::job::{JobError, JobRequest, PollPolicy};

/// RunPod 客户端配置
#[derive(Debug, Clone)]
pub struct ChatterboxConfig {
    /// `https://api.runpod.ai/v2/{endpoint}`
    pub base_url: String,
    pub language: String,
    pub speed: f64,
    pub pitch: f64,
    pub poll: PollPolicy,
    /// 是否配置了 API key
    pub enabled: bool,
}

impl ChatterboxConfig {
    pub fn for_endpoint(endpoint: &str) -> Self {
        Self {
            base_url: format!("https://api.runpod.ai/v2/{}", endpoint),
            ..Default::default()
        }
    }
}

impl Default for ChatterboxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.runpod.ai/v2/chatterbox-tts".to_string(),
            language: "de".to_string(),
            speed: 0.95,
            pitch: 1.0,
            poll: PollPolicy::new(1000, 60),
            enabled: true,
        }
    }
}

/// RunPod Chatterbox 客户端
pub struct ChatterboxClient {
    jobs: Arc<RemoteJobClient>,
    config: ChatterboxConfig,
    shutdown: CancellationToken,
}

impl ChatterboxClient {
    pub fn new(jobs: Arc<RemoteJobClient>, config: ChatterboxConfig, shutdown: CancellationToken) -> Self {
        Self {
            jobs,
            config,
            shutdown,
        }
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[async_trait]
impl NarrationPort for ChatterboxClient {
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, JobError> {
        let payload = json!({
            "input": {
                "text": request.text,
                "voice_settings": {
                    "style": request.style,
                    "language": self.config.language,
                    "speed": self.config.speed,
                    "pitch": self.config.pitch,
                },
                "output_format": "mp3",
            }
        });
        let job = JobRequest::new(format!("{}/runsync", self.base()), payload)
            .with_label("runpod-narration")
            .with_status_base(format!("{}/status", self.base()));

        self.jobs
            .run(&job, self.config.poll, &self.shutdown)
            .await
            .into_result()
    }

    fn is_configured(&self) -> bool {
        self.config.enabled
    }
}
