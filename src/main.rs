//! Arkana - 猫咪塔罗的语音与识别后端
//!
//! 启动流程: 配置 → 日志 → 各提供方传输与适配器 → 音色克隆注册表 → HTTP 服务

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use arkana::application::RemoteJobClient;
use arkana::config::{load_config, print_config, AppConfig};
use arkana::infrastructure::adapters::{
    AnthropicClient, AnthropicConfig, ChatterboxClient, ChatterboxConfig, HttpJobTransport,
    HttpJobTransportConfig, ProviderAuth, ThreadRandom, TokioSleeper, WavespeedConfig,
    WavespeedSpeechClient,
};
use arkana::infrastructure::http::{AppState, HttpServer, ServerConfig};
use arkana::infrastructure::JsonFileVoiceCloneStore;

/// 每个提供方一个传输（鉴权与超时不同），共用同一个 sleeper
fn job_client(auth: ProviderAuth, timeout_secs: u64) -> anyhow::Result<Arc<RemoteJobClient>> {
    let transport = HttpJobTransport::new(HttpJobTransportConfig::new(auth).with_timeout(timeout_secs))
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    Ok(Arc::new(RemoteJobClient::new(
        Arc::new(transport),
        Arc::new(TokioSleeper),
    )))
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},arkana={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Arkana - tarot voice & vision backend");
    print_config(&config);

    let shutdown = CancellationToken::new();

    // Wavespeed 语音合成与克隆
    let wavespeed = &config.wavespeed;
    let speech = Arc::new(WavespeedSpeechClient::new(
        job_client(ProviderAuth::Bearer(wavespeed.api_key.clone()), wavespeed.timeout_secs)?,
        WavespeedConfig {
            speech_url: wavespeed.speech_url.clone(),
            clone_url: wavespeed.clone_url.clone(),
            speech_poll: wavespeed.speech_poll.policy(),
            clone_poll: wavespeed.clone_poll.policy(),
            enabled: !wavespeed.api_key.is_empty(),
            ..Default::default()
        },
        shutdown.clone(),
    ));

    // Anthropic 卡牌识别与角色文本
    let anthropic = &config.anthropic;
    let claude = Arc::new(AnthropicClient::new(
        job_client(
            ProviderAuth::AnthropicKey {
                api_key: anthropic.api_key.clone(),
                version: anthropic.api_version.clone(),
            },
            anthropic.timeout_secs,
        )?,
        AnthropicConfig {
            messages_url: anthropic.messages_url.clone(),
            text_model: anthropic.text_model.clone(),
            text_max_tokens: anthropic.text_max_tokens,
            enabled: !anthropic.api_key.is_empty(),
        },
        shutdown.clone(),
    ));

    // RunPod Chatterbox 朗读
    let runpod = &config.runpod;
    let narration = Arc::new(ChatterboxClient::new(
        job_client(ProviderAuth::Bearer(runpod.api_key.clone()), runpod.timeout_secs)?,
        ChatterboxConfig {
            base_url: runpod.endpoint_url(),
            poll: runpod.poll.policy(),
            enabled: !runpod.api_key.is_empty(),
            ..Default::default()
        },
        shutdown.clone(),
    ));

    // 音色克隆注册表
    let voice_clones = Arc::new(
        JsonFileVoiceCloneStore::open(&config.storage.voice_clones_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load voice clones: {}", e))?,
    );

    let state = AppState::new(
        claude.clone(),
        anthropic.model_variants(),
        claude,
        speech,
        narration,
        voice_clones,
        Arc::new(ThreadRandom),
    );

    let server = HttpServer::new(
        ServerConfig::new(&config.server.host, config.server.port),
        state,
    );

    // 启动服务器（带优雅关闭）；关闭时取消所有进行中的轮询
    let token = shutdown.clone();
    server
        .run_with_shutdown(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for ctrl-c"),
            }
            token.cancel();
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
