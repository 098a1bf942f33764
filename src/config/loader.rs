//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`ARKANA_` 前缀）
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 默认值（部分由旧部署的环境变量提供）

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧部署使用的环境变量，只作为默认值
fn legacy_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// 加载应用配置
///
/// # 环境变量示例
/// - `ARKANA_SERVER__PORT=8080`
/// - `ARKANA_WAVESPEED__API_KEY=...`
/// - `ARKANA_RUNPOD__ENDPOINT=abc123`
/// - `ARKANA_LOG__JSON=true`
///
/// `WAVESPEED_API_KEY`、`ANTHROPIC_API_KEY`、`RUNPOD_API_KEY`、
/// `CHATTERBOX_ENDPOINT`、`PORT` 仍然生效，但优先级最低
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    let port = legacy_env("PORT")
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", i64::from(port))?
        .set_default(
            "wavespeed.api_key",
            legacy_env("WAVESPEED_API_KEY").unwrap_or_default(),
        )?
        .set_default(
            "anthropic.api_key",
            legacy_env("ANTHROPIC_API_KEY").unwrap_or_default(),
        )?
        .set_default("runpod.api_key", legacy_env("RUNPOD_API_KEY").unwrap_or_default())?
        .set_default(
            "runpod.endpoint",
            legacy_env("CHATTERBOX_ENDPOINT").unwrap_or_else(|| "chatterbox-tts".to_string()),
        )?
        .set_default("storage.voice_clones_path", "data/voice_clones.json")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: ARKANA_ANTHROPIC__TEXT_MODEL=claude-3-5-sonnet-latest
    builder = builder.add_source(
        Environment::with_prefix("ARKANA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let urls = [
        ("wavespeed.speech_url", &config.wavespeed.speech_url),
        ("wavespeed.clone_url", &config.wavespeed.clone_url),
        ("anthropic.messages_url", &config.anthropic.messages_url),
    ];
    for (name, url) in urls {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!("{} cannot be empty", name)));
        }
    }
    let runpod_target = match &config.runpod.base_url {
        Some(url) => url.as_str(),
        None => config.runpod.endpoint.as_str(),
    };
    if runpod_target.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "runpod.endpoint cannot be empty".to_string(),
        ));
    }

    let polls = [
        ("wavespeed.speech_poll", config.wavespeed.speech_poll),
        ("wavespeed.clone_poll", config.wavespeed.clone_poll),
        ("runpod.poll", config.runpod.poll),
    ];
    for (name, poll) in polls {
        if poll.max_attempts == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}.max_attempts must be at least 1",
                name
            )));
        }
    }

    if config.anthropic.vision_variants.is_empty() {
        return Err(ConfigError::ValidationError(
            "anthropic.vision_variants cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不输出 API key）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "Wavespeed: configured={}, poll={}ms x {}",
        !config.wavespeed.api_key.is_empty(),
        config.wavespeed.speech_poll.interval_ms,
        config.wavespeed.speech_poll.max_attempts
    );
    tracing::info!(
        "Anthropic: configured={}, text_model={}",
        !config.anthropic.api_key.is_empty(),
        config.anthropic.text_model
    );
    tracing::info!(
        "Vision Variants: {}",
        config
            .anthropic
            .vision_variants
            .iter()
            .map(|v| v.model.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    tracing::info!(
        "RunPod: configured={}, url={}",
        !config.runpod.api_key.is_empty(),
        config.runpod.endpoint_url()
    );
    tracing::info!("Voice Clones: {}", config.storage.voice_clones_path.display());
    tracing::info!("Log Level: {} (json={})", config.log.level, config.log.json);
    tracing::info!("=================================");
}
