//! Voice Clone Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    CreateVoiceClone, CreateVoiceCloneResponse, DeleteVoiceClone, DeleteVoiceCloneResponse,
    SpeakWithClone, TestVoiceClone,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{SpeechSynthesisPort, VoiceCloneRequest, VoiceCloneStorePort};
use crate::application::speech::{ClonedSpeechPipeline, SpeechOutcome};
use crate::domain::random::{pick, RandomSource};
use crate::domain::voice::{custom_voice_id, Emotion, VoiceCloneRecord, VoiceEmbedding};

const TEST_PHRASES: [&str; 4] = [
    "WOW! Das ist ja MEINE Stimme! Kannst du das glauben? Das klingt wirklich wie ich!",
    "Ich bin SO aufgeregt! Meine eigene Stimme wurde gerade geklont und es ist FANTASTISCH!",
    "OH MEIN GOTT! Das ist unglaublich! Ich höre mich selbst sprechen! Die Technologie ist der WAHNSINN!",
    "YESSS! Das funktioniert wirklich! Ich kann jetzt mit meiner eigenen Stimme antworten! Wie cool ist das denn?",
];

const TEST_EMOTIONS: [Emotion; 2] = [Emotion::Happy, Emotion::Surprised];

fn require(value: &str, field: &str) -> Result<(), ApplicationError> {
    if value.trim().is_empty() {
        return Err(ApplicationError::validation(format!("{} is required", field)));
    }
    Ok(())
}

// ============================================================================
// CreateVoiceClone
// ============================================================================

/// CreateVoiceClone Handler
///
/// 已有克隆时直接返回；提供方克隆失败或未配置时退化为 Mock 嵌入
pub struct CreateVoiceCloneHandler {
    speech: Arc<dyn SpeechSynthesisPort>,
    store: Arc<dyn VoiceCloneStorePort>,
}

impl CreateVoiceCloneHandler {
    pub fn new(speech: Arc<dyn SpeechSynthesisPort>, store: Arc<dyn VoiceCloneStorePort>) -> Self {
        Self { speech, store }
    }

    pub async fn handle(
        &self,
        command: CreateVoiceClone,
    ) -> Result<CreateVoiceCloneResponse, ApplicationError> {
        require(&command.user_id, "userId")?;
        require(&command.audio_base64, "audio")?;

        if let Some(existing) = self.store.get(&command.user_id) {
            tracing::info!(user_id = %command.user_id, "Voice clone already exists");
            return Ok(CreateVoiceCloneResponse {
                user_id: command.user_id,
                voice_id: existing.embedding.voice_id().map(str::to_string),
                created: false,
                mode: "existing",
                preview_url: None,
                fallback_reason: None,
                created_at: existing.created_at,
                sample_duration_secs: existing.sample_duration_secs,
                language: existing.language,
            });
        }

        let (embedding, fallback_reason) = self.clone_or_mock(&command).await;
        let preview_url = match &embedding {
            VoiceEmbedding::WavespeedMinimax { preview_url, .. } => preview_url.clone(),
            VoiceEmbedding::Mock { .. } => None,
        };

        let record = VoiceCloneRecord::new(embedding);
        self.store.set(&command.user_id, record.clone());
        self.store.persist().await?;

        tracing::info!(
            user_id = %command.user_id,
            mode = record.embedding.mode(),
            "Voice clone created"
        );

        Ok(CreateVoiceCloneResponse {
            user_id: command.user_id,
            voice_id: record.embedding.voice_id().map(str::to_string),
            created: true,
            mode: record.embedding.mode(),
            preview_url,
            fallback_reason,
            created_at: record.created_at,
            sample_duration_secs: record.sample_duration_secs,
            language: record.language,
        })
    }

    async fn clone_or_mock(&self, command: &CreateVoiceClone) -> (VoiceEmbedding, Option<String>) {
        if !self.speech.is_configured() {
            tracing::warn!("Speech provider not configured, using mock embedding");
            return (
                VoiceEmbedding::mock_from_sample(&command.audio_base64),
                Some("speech provider not configured".to_string()),
            );
        }

        let voice_id = custom_voice_id(&command.user_id);
        let request = VoiceCloneRequest {
            audio_base64: command.audio_base64.clone(),
            custom_voice_id: voice_id.clone(),
        };

        match self.speech.clone_voice(&request).await {
            Ok(preview_url) => (
                VoiceEmbedding::WavespeedMinimax {
                    voice_id,
                    preview_url,
                },
                None,
            ),
            Err(e) => {
                tracing::warn!(
                    user_id = %command.user_id,
                    error = %e,
                    "Voice cloning failed, using mock embedding"
                );
                (
                    VoiceEmbedding::mock_from_sample(&command.audio_base64),
                    Some(format!("voice cloning failed: {}", e)),
                )
            }
        }
    }
}

// ============================================================================
// DeleteVoiceClone
// ============================================================================

/// DeleteVoiceClone Handler
pub struct DeleteVoiceCloneHandler {
    store: Arc<dyn VoiceCloneStorePort>,
}

impl DeleteVoiceCloneHandler {
    pub fn new(store: Arc<dyn VoiceCloneStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        command: DeleteVoiceClone,
    ) -> Result<DeleteVoiceCloneResponse, ApplicationError> {
        require(&command.user_id, "userId")?;

        let deleted = self.store.delete(&command.user_id).is_some();
        if deleted {
            self.store.persist().await?;
            tracing::info!(user_id = %command.user_id, "Voice clone deleted");
        }

        Ok(DeleteVoiceCloneResponse {
            user_id: command.user_id,
            deleted,
        })
    }
}

// ============================================================================
// TestVoiceClone / SpeakWithClone
// ============================================================================

/// TestVoiceClone Handler
pub struct TestVoiceCloneHandler {
    pipeline: Arc<ClonedSpeechPipeline>,
    random: Arc<dyn RandomSource>,
}

impl TestVoiceCloneHandler {
    pub fn new(pipeline: Arc<ClonedSpeechPipeline>, random: Arc<dyn RandomSource>) -> Self {
        Self { pipeline, random }
    }

    pub async fn handle(&self, command: TestVoiceClone) -> Result<SpeechOutcome, ApplicationError> {
        require(&command.user_id, "userId")?;

        let text = pick(self.random.as_ref(), &TEST_PHRASES).copied().unwrap_or(TEST_PHRASES[0]);
        let emotion = pick(self.random.as_ref(), &TEST_EMOTIONS).copied();

        self.pipeline.speak(&command.user_id, text, emotion).await
    }
}

/// SpeakWithClone Handler
pub struct SpeakWithCloneHandler {
    pipeline: Arc<ClonedSpeechPipeline>,
}

impl SpeakWithCloneHandler {
    pub fn new(pipeline: Arc<ClonedSpeechPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn handle(&self, command: SpeakWithClone) -> Result<SpeechOutcome, ApplicationError> {
        require(&command.user_id, "userId")?;
        require(&command.text, "text")?;

        self.pipeline
            .speak(&command.user_id, &command.text, command.emotion)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::speech::SpeechMode;
    use crate::domain::job::JobError;
    use crate::testing::{FakeSpeech, FixedRandom, MemoryVoiceCloneStore};

    fn create_command(user_id: &str) -> CreateVoiceClone {
        CreateVoiceClone {
            user_id: user_id.to_string(),
            audio_base64: "UklGRiQAAABXQVZFZm10IBAAAAAB".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_clones_with_provider() {
        let speech = Arc::new(FakeSpeech::new());
        let store = Arc::new(MemoryVoiceCloneStore::new());
        let handler = CreateVoiceCloneHandler::new(speech.clone(), store.clone());

        let response = handler.handle(create_command("ab-cd-ef-gh-ij")).await.unwrap();

        assert!(response.created);
        assert_eq!(response.mode, "wavespeed_minimax");
        assert_eq!(response.voice_id.as_deref(), Some("WaveUserabcdef"));
        assert_eq!(speech.clone_calls(), vec!["WaveUserabcdef"]);
        assert_eq!(store.persists(), 1);
        assert!(store.contains("ab-cd-ef-gh-ij"));
    }

    #[tokio::test]
    async fn test_create_returns_existing_without_cloning_again() {
        let speech = Arc::new(FakeSpeech::new());
        let store = Arc::new(MemoryVoiceCloneStore::new());
        let handler = CreateVoiceCloneHandler::new(speech.clone(), store.clone());

        handler.handle(create_command("user-1")).await.unwrap();
        let second = handler.handle(create_command("user-1")).await.unwrap();

        assert!(!second.created);
        assert_eq!(second.mode, "existing");
        assert_eq!(second.voice_id.as_deref(), Some("WaveUseruser1"));
        assert_eq!(speech.clone_calls().len(), 1);
        assert_eq!(store.persists(), 1);
    }

    #[tokio::test]
    async fn test_create_degrades_to_mock() {
        let store = Arc::new(MemoryVoiceCloneStore::new());
        let handler = CreateVoiceCloneHandler::new(
            Arc::new(FakeSpeech::new().failing_clone(JobError::provider("audio too short"))),
            store.clone(),
        );

        let response = handler.handle(create_command("u1")).await.unwrap();

        assert_eq!(response.mode, "mock");
        assert!(response.voice_id.is_none());
        assert!(response.fallback_reason.unwrap().contains("audio too short"));
        assert!(matches!(
            store.get("u1").unwrap().embedding,
            VoiceEmbedding::Mock { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_without_provider_key_uses_mock() {
        let speech = Arc::new(FakeSpeech::new().unconfigured());
        let handler =
            CreateVoiceCloneHandler::new(speech.clone(), Arc::new(MemoryVoiceCloneStore::new()));

        let response = handler.handle(create_command("u1")).await.unwrap();

        assert_eq!(response.mode, "mock");
        assert!(speech.clone_calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_audio() {
        let handler = CreateVoiceCloneHandler::new(
            Arc::new(FakeSpeech::new()),
            Arc::new(MemoryVoiceCloneStore::new()),
        );

        let result = handler
            .handle(CreateVoiceClone {
                user_id: "u1".to_string(),
                audio_base64: " ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_clone() {
        let store = Arc::new(MemoryVoiceCloneStore::new());
        store.set("u1", VoiceCloneRecord::new(VoiceEmbedding::Mock { hash: 1 }));
        let handler = DeleteVoiceCloneHandler::new(store.clone());

        let first = handler
            .handle(DeleteVoiceClone {
                user_id: "u1".to_string(),
            })
            .await
            .unwrap();
        let second = handler
            .handle(DeleteVoiceClone {
                user_id: "u1".to_string(),
            })
            .await
            .unwrap();

        assert!(first.deleted);
        assert!(!second.deleted);
        assert_eq!(store.persists(), 1);
    }

    #[tokio::test]
    async fn test_voice_clone_test_uses_upbeat_emotion() {
        let speech = Arc::new(FakeSpeech::new());
        let store = Arc::new(MemoryVoiceCloneStore::new());
        store.set(
            "u1",
            VoiceCloneRecord::new(VoiceEmbedding::WavespeedMinimax {
                voice_id: "WaveUseru1".to_string(),
                preview_url: None,
            }),
        );
        let random: Arc<dyn RandomSource> = Arc::new(FixedRandom::new([0.3, 0.7]));
        let pipeline = Arc::new(ClonedSpeechPipeline::new(speech.clone(), store, random.clone()));
        let handler = TestVoiceCloneHandler::new(pipeline, random);

        let outcome = handler
            .handle(TestVoiceClone {
                user_id: "u1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.mode, SpeechMode::Cloned);
        assert_eq!(outcome.text, TEST_PHRASES[1]);
        assert_eq!(outcome.emotion, Emotion::Surprised);
    }

    #[tokio::test]
    async fn test_speak_requires_text() {
        let pipeline = Arc::new(ClonedSpeechPipeline::new(
            Arc::new(FakeSpeech::new()),
            Arc::new(MemoryVoiceCloneStore::new()),
            Arc::new(FixedRandom::new([0.0])),
        ));
        let handler = SpeakWithCloneHandler::new(pipeline);

        let result = handler
            .handle(SpeakWithClone {
                user_id: "u1".to_string(),
                text: String::new(),
                emotion: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }
}
