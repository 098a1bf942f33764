//! Configuration Types
//!
//! 定义所有配置结构体。API key 只在这里出现，启动后以构造参数传给各适配器

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::card::ModelVariant;
use crate::domain::job::PollPolicy;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Wavespeed（MiniMax 语音合成与音色克隆）
    #[serde(default)]
    pub wavespeed: WavespeedConfig,

    /// Anthropic（卡牌识别与角色文本）
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// RunPod Chatterbox（塔罗解读朗读）
    #[serde(default)]
    pub runpod: RunpodConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 轮询策略
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl PollConfig {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy::new(self.interval_ms, self.max_attempts)
    }
}

/// Wavespeed 配置
#[derive(Debug, Clone, Deserialize)]
pub struct WavespeedConfig {
    /// 为空时语音合成不可用，克隆退化为 Mock 嵌入
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_wavespeed_speech_url")]
    pub speech_url: String,

    #[serde(default = "default_wavespeed_clone_url")]
    pub clone_url: String,

    /// 单次 HTTP 请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_speech_poll")]
    pub speech_poll: PollConfig,

    #[serde(default = "default_clone_poll")]
    pub clone_poll: PollConfig,
}

fn default_wavespeed_speech_url() -> String {
    "https://api.wavespeed.ai/api/v3/minimax/speech-02-hd".to_string()
}

fn default_wavespeed_clone_url() -> String {
    "https://api.wavespeed.ai/api/v3/minimax/voice-clone".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_speech_poll() -> PollConfig {
    PollConfig {
        interval_ms: 1000,
        max_attempts: 30,
    }
}

fn default_clone_poll() -> PollConfig {
    PollConfig {
        interval_ms: 2000,
        max_attempts: 30,
    }
}

impl Default for WavespeedConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            speech_url: default_wavespeed_speech_url(),
            clone_url: default_wavespeed_clone_url(),
            timeout_secs: default_request_timeout(),
            speech_poll: default_speech_poll(),
            clone_poll: default_clone_poll(),
        }
    }
}

/// 识别模型（从弱到强）
#[derive(Debug, Clone, Deserialize)]
pub struct VisionVariantConfig {
    pub model: String,
    #[serde(default = "default_vision_max_tokens")]
    pub max_tokens: u32,
}

fn default_vision_max_tokens() -> u32 {
    100
}

/// Anthropic 配置
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_anthropic_version")]
    pub api_version: String,

    #[serde(default = "default_messages_url")]
    pub messages_url: String,

    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    /// 角色回答使用的模型
    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_text_max_tokens")]
    pub text_max_tokens: u32,

    /// 卡牌识别的降级顺序
    #[serde(default = "default_vision_variants")]
    pub vision_variants: Vec<VisionVariantConfig>,
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

fn default_messages_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_text_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_text_max_tokens() -> u32 {
    300
}

fn default_vision_variants() -> Vec<VisionVariantConfig> {
    [
        "claude-3-haiku-20240307",
        "claude-3-5-sonnet-20241022",
        "claude-3-opus-20240229",
    ]
    .into_iter()
    .map(|model| VisionVariantConfig {
        model: model.to_string(),
        max_tokens: default_vision_max_tokens(),
    })
    .collect()
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_version: default_anthropic_version(),
            messages_url: default_messages_url(),
            timeout_secs: default_request_timeout(),
            text_model: default_text_model(),
            text_max_tokens: default_text_max_tokens(),
            vision_variants: default_vision_variants(),
        }
    }
}

impl AnthropicConfig {
    pub fn model_variants(&self) -> Vec<ModelVariant> {
        self.vision_variants
            .iter()
            .map(|v| ModelVariant::new(v.model.clone(), v.max_tokens))
            .collect()
    }
}

/// RunPod 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RunpodConfig {
    #[serde(default)]
    pub api_key: String,

    /// Chatterbox endpoint ID
    #[serde(default = "default_chatterbox_endpoint")]
    pub endpoint: String,

    /// 覆盖 `https://api.runpod.ai/v2/{endpoint}`
    #[serde(default)]
    pub base_url: Option<String>,

    /// `/runsync` 会等待合成完成，超时要比普通请求长
    #[serde(default = "default_runpod_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_runpod_poll")]
    pub poll: PollConfig,
}

fn default_chatterbox_endpoint() -> String {
    "chatterbox-tts".to_string()
}

fn default_runpod_timeout() -> u64 {
    120
}

fn default_runpod_poll() -> PollConfig {
    PollConfig {
        interval_ms: 1000,
        max_attempts: 60,
    }
}

impl Default for RunpodConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_chatterbox_endpoint(),
            base_url: None,
            timeout_secs: default_runpod_timeout(),
            poll: default_runpod_poll(),
        }
    }
}

impl RunpodConfig {
    pub fn endpoint_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://api.runpod.ai/v2/{}", self.endpoint))
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音色克隆注册表文件
    #[serde(default = "default_voice_clones_path")]
    pub voice_clones_path: PathBuf,
}

fn default_voice_clones_path() -> PathBuf {
    PathBuf::from("data/voice_clones.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            voice_clones_path: default_voice_clones_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:3001");
        assert_eq!(config.wavespeed.speech_poll.policy(), PollPolicy::new(1000, 30));
        assert_eq!(config.wavespeed.clone_poll.policy(), PollPolicy::new(2000, 30));
        assert_eq!(config.anthropic.model_variants().len(), 3);
        assert_eq!(config.anthropic.model_variants()[0].model, "claude-3-haiku-20240307");
    }

    #[test]
    fn test_runpod_endpoint_url() {
        let mut config = RunpodConfig::default();
        config.endpoint = "abc123".to_string();
        assert_eq!(config.endpoint_url(), "https://api.runpod.ai/v2/abc123");

        config.base_url = Some("http://localhost:9000".to_string());
        assert_eq!(config.endpoint_url(), "http://localhost:9000");
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AnthropicConfig =
            serde_json::from_str(r#"{ "api_key": "sk-test" }"#).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.text_max_tokens, 300);
        assert_eq!(config.vision_variants.len(), 3);
    }
}
