//! Anthropic Messages Client
//!
//! 实现 VisionModelPort 与 TextGenerationPort。Messages API 是同步的，
//! 响应 `content[0].text` 被 RemoteJobClient 识别为直接结果，不会轮询

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::jobs::RemoteJobClient;
use crate::application::ports::{CardImage, TextGenerationPort, TextPrompt, VisionModelPort};
use crate::domain::card::ModelVariant;
use crate::domain::job::{JobError, JobRequest, PollPolicy};

pub const DEFAULT_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

const CARD_INSTRUCTION: &str = "Dies ist ein Scanner für Katzen-Tarot-Karten. \
Das sind spezielle Tarot-Karten mit niedlichen Katzen-Charakteren.

WICHTIG: Jede Karte hat ein Banner/Label am unteren Rand mit dem Kartennamen.

Bitte schaue dir das Bild an:
1. Ist es eine Tarot-Karte mit einer Katze und einem Text-Banner unten?
2. Wenn ja, lies den Text im Banner am unteren Rand der Karte.
3. Der Text könnte sein wie: \"THE MAGICIAN\", \"PAGE OF CUPS\", \"THE FOOL\", \"THE EMPRESS\", etc.

Antworte NUR mit dem exakten Text aus dem Banner (z.B. \"THE MAGICIAN\" oder \"PAGE OF CUPS\").

Wenn es KEINE Katzen-Tarot-Karte ist oder du den Text nicht lesen kannst, antworte mit: \"Unbekannt\"

Wenn es eine falsche Karte ist (keine Katze oder kein Banner), antworte mit: \"Falsche Karte\"

WICHTIG: Gib NUR den Kartennamen aus dem Banner zurück, nichts anderes!";

/// Anthropic 客户端配置
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub messages_url: String,
    pub text_model: String,
    pub text_max_tokens: u32,
    /// 是否配置了 API key
    pub enabled: bool,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            messages_url: DEFAULT_MESSAGES_URL.to_string(),
            text_model: "claude-3-5-haiku-latest".to_string(),
            text_max_tokens: 300,
            enabled: true,
        }
    }
}

/// Anthropic Messages 客户端
pub struct AnthropicClient {
    jobs: Arc<RemoteJobClient>,
    config: AnthropicConfig,
    shutdown: CancellationToken,
}

impl AnthropicClient {
    pub fn new(jobs: Arc<RemoteJobClient>, config: AnthropicConfig, shutdown: CancellationToken) -> Self {
        Self {
            jobs,
            config,
            shutdown,
        }
    }

    async fn send(&self, label: &str, payload: Value) -> Result<String, JobError> {
        let job = JobRequest::new(&self.config.messages_url, payload).with_label(label);
        self.jobs
            .run(&job, PollPolicy::default(), &self.shutdown)
            .await
            .into_result()
    }
}

#[async_trait]
impl VisionModelPort for AnthropicClient {
    async fn read_card(&self, variant: &ModelVariant, image: &CardImage) -> Result<String, JobError> {
        if !self.config.enabled {
            return Err(JobError::provider("Anthropic API key not configured"));
        }

        let payload = json!({
            "model": variant.model,
            "max_tokens": variant.max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": CARD_INSTRUCTION},
                    {
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": image.media_type,
                            "data": image.data_base64,
                        }
                    }
                ]
            }]
        });

        self.send("anthropic-vision", payload).await
    }
}

#[async_trait]
impl TextGenerationPort for AnthropicClient {
    async fn generate(&self, prompt: &TextPrompt) -> Result<String, JobError> {
        let payload = json!({
            "model": self.config.text_model,
            "max_tokens": self.config.text_max_tokens,
            "system": prompt.system,
            "messages": [{"role": "user", "content": prompt.user}],
        });

        self.send("anthropic-text", payload).await
    }

    fn is_configured(&self) -> bool {
        self.config.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSleeper, ScriptedTransport};

    fn client(reply: Value, enabled: bool) -> (AnthropicClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(reply)]));
        let jobs = Arc::new(RemoteJobClient::new(
            transport.clone(),
            Arc::new(RecordingSleeper::new()),
        ));
        let config = AnthropicConfig {
            enabled,
            ..Default::default()
        };
        (
            AnthropicClient::new(jobs, config, CancellationToken::new()),
            transport,
        )
    }

    #[tokio::test]
    async fn test_read_card_sends_image_and_variant() {
        let (client, transport) = client(
            json!({"content": [{"type": "text", "text": "THE FOOL"}]}),
            true,
        );

        let answer = client
            .read_card(
                &ModelVariant::new("claude-3-haiku-20240307", 100),
                &CardImage::jpeg("abc"),
            )
            .await
            .unwrap();

        assert_eq!(answer, "THE FOOL");
        let (endpoint, body) = &transport.posts()[0];
        assert_eq!(endpoint, DEFAULT_MESSAGES_URL);
        assert_eq!(body["model"], "claude-3-haiku-20240307");
        assert_eq!(body["messages"][0]["content"][1]["source"]["data"], "abc");
        assert_eq!(transport.get_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_sends_system_prompt() {
        let (client, transport) = client(json!({"content": [{"text": "Mon Dieu!"}]}), true);

        let answer = client
            .generate(&TextPrompt {
                system: "Du bist DER FROSCHKÖNIG".to_string(),
                user: "FRAGE: ?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(answer, "Mon Dieu!");
        let body = &transport.posts()[0].1;
        assert_eq!(body["system"], "Du bist DER FROSCHKÖNIG");
        assert_eq!(body["max_tokens"], 300);
    }

    #[tokio::test]
    async fn test_unconfigured_vision_fails_without_request() {
        let (client, transport) = client(json!({}), false);

        let error = client
            .read_card(&ModelVariant::new("m", 10), &CardImage::jpeg("abc"))
            .await
            .unwrap_err();

        assert!(!error.is_recoverable());
        assert_eq!(transport.post_calls(), 0);
        assert!(!TextGenerationPort::is_configured(&client));
    }
}
