//! Cloned Speech Pipeline - 用用户的克隆音色合成语音
//!
//! 降级顺序: MiniMax 克隆音色 → 个性化标准音色（Mock 嵌入）→ 标准音色。
//! 每次降级都记录在结果的 `mode` / `fallback_reason` 中

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SpeechRequest, SpeechSynthesisPort, VoiceCloneStorePort};
use crate::domain::random::RandomSource;
use crate::domain::voice::{Emotion, EmotionPicker, PersonalizedVoice, VoiceEmbedding, STANDARD_VOICE_ID};

/// 实际使用的合成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechMode {
    /// 用户的克隆音色
    Cloned,
    /// 标准音色 + 由录音派生的语速/音高
    Personalized,
    /// 标准音色
    Standard,
}

/// 合成结果
#[derive(Debug, Clone, Serialize)]
pub struct SpeechOutcome {
    pub audio_url: String,
    pub text: String,
    pub emotion: Emotion,
    pub voice_id: String,
    pub mode: SpeechMode,
    /// 未使用克隆音色的原因
    pub fallback_reason: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl SpeechOutcome {
    pub fn used_voice_clone(&self) -> bool {
        self.mode == SpeechMode::Cloned
    }
}

pub struct ClonedSpeechPipeline {
    speech: Arc<dyn SpeechSynthesisPort>,
    store: Arc<dyn VoiceCloneStorePort>,
    random: Arc<dyn RandomSource>,
    emotions: EmotionPicker,
}

impl ClonedSpeechPipeline {
    pub fn new(
        speech: Arc<dyn SpeechSynthesisPort>,
        store: Arc<dyn VoiceCloneStorePort>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            speech,
            store,
            random,
            emotions: EmotionPicker::default(),
        }
    }

    pub fn has_clone(&self, user_id: &str) -> bool {
        self.store.contains(user_id)
    }

    /// 用用户的音色合成；`emotion` 为 None 时随机选择
    pub async fn speak(
        &self,
        user_id: &str,
        text: &str,
        emotion: Option<Emotion>,
    ) -> Result<SpeechOutcome, ApplicationError> {
        let emotion = self.emotions.pick(emotion, self.random.as_ref());

        let reason = match self.store.get(user_id).map(|record| record.embedding) {
            None => format!("no voice clone for user {}", user_id),
            Some(VoiceEmbedding::WavespeedMinimax { voice_id, .. }) => {
                let request = SpeechRequest::new(text, voice_id.as_str(), emotion);
                match self.speech.synthesize(&request).await {
                    Ok(audio_url) => {
                        tracing::info!(user_id, voice_id = %voice_id, "Speech generated with cloned voice");
                        return Ok(self.outcome(audio_url, request, SpeechMode::Cloned, None));
                    }
                    Err(e) => {
                        tracing::warn!(user_id, voice_id = %voice_id, error = %e, "Cloned voice failed");
                        format!("cloned voice failed: {}", e)
                    }
                }
            }
            Some(VoiceEmbedding::Mock { hash }) => {
                let voice = PersonalizedVoice::from_hash(hash);
                let request = SpeechRequest::new(text, STANDARD_VOICE_ID, emotion)
                    .with_prosody(voice.speed, voice.pitch);
                match self.speech.synthesize(&request).await {
                    Ok(audio_url) => {
                        tracing::info!(
                            user_id,
                            speed = voice.speed,
                            pitch = voice.pitch,
                            "Speech generated with personalized voice"
                        );
                        return Ok(self.outcome(
                            audio_url,
                            request,
                            SpeechMode::Personalized,
                            Some("voice clone unavailable, using personalized voice".to_string()),
                        ));
                    }
                    Err(e) => {
                        tracing::warn!(user_id, error = %e, "Personalized voice failed");
                        format!("personalized voice failed: {}", e)
                    }
                }
            }
        };

        self.speak_standard(text, Some(emotion), Some(reason)).await
    }

    /// 标准音色合成（最后一级）
    pub async fn speak_standard(
        &self,
        text: &str,
        emotion: Option<Emotion>,
        reason: Option<String>,
    ) -> Result<SpeechOutcome, ApplicationError> {
        let emotion = self.emotions.pick(emotion, self.random.as_ref());
        let request = SpeechRequest::new(text, STANDARD_VOICE_ID, emotion);

        let audio_url = self.speech.synthesize(&request).await.map_err(|e| {
            tracing::error!(error = %e, "Standard voice failed");
            ApplicationError::from(e)
        })?;

        if let Some(reason) = &reason {
            tracing::info!(reason = %reason, "Speech generated with standard voice");
        }
        Ok(self.outcome(audio_url, request, SpeechMode::Standard, reason))
    }

    fn outcome(
        &self,
        audio_url: String,
        request: SpeechRequest,
        mode: SpeechMode,
        fallback_reason: Option<String>,
    ) -> SpeechOutcome {
        SpeechOutcome {
            audio_url,
            text: request.text,
            emotion: request.emotion,
            voice_id: request.voice_id,
            mode,
            fallback_reason,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceCloneRecord;
    use crate::testing::{FakeSpeech, FixedRandom, MemoryVoiceCloneStore};

    fn pipeline(speech: FakeSpeech) -> (ClonedSpeechPipeline, Arc<FakeSpeech>, Arc<MemoryVoiceCloneStore>) {
        let speech = Arc::new(speech);
        let store = Arc::new(MemoryVoiceCloneStore::new());
        let pipeline = ClonedSpeechPipeline::new(
            speech.clone(),
            store.clone(),
            Arc::new(FixedRandom::new([0.9])),
        );
        (pipeline, speech, store)
    }

    fn minimax(voice_id: &str) -> VoiceCloneRecord {
        VoiceCloneRecord::new(VoiceEmbedding::WavespeedMinimax {
            voice_id: voice_id.to_string(),
            preview_url: None,
        })
    }

    #[tokio::test]
    async fn test_uses_cloned_voice() {
        let (pipeline, speech, store) = pipeline(FakeSpeech::new());
        store.set("u1", minimax("WaveUseru1"));

        let outcome = pipeline
            .speak("u1", "Hallo", Some(Emotion::Happy))
            .await
            .unwrap();

        assert_eq!(outcome.mode, SpeechMode::Cloned);
        assert_eq!(outcome.voice_id, "WaveUseru1");
        assert!(outcome.fallback_reason.is_none());
        assert_eq!(speech.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_clone_failure_degrades_to_standard_with_reason() {
        let (pipeline, speech, store) = pipeline(FakeSpeech::new().failing_voice("WaveUseru1"));
        store.set("u1", minimax("WaveUseru1"));

        let outcome = pipeline.speak("u1", "Hallo", None).await.unwrap();

        assert_eq!(outcome.mode, SpeechMode::Standard);
        assert_eq!(outcome.voice_id, STANDARD_VOICE_ID);
        assert!(outcome
            .fallback_reason
            .as_deref()
            .unwrap()
            .starts_with("cloned voice failed"));
        // 0.9 落在 surprised 的权重区间
        assert_eq!(outcome.emotion, Emotion::Surprised);
        assert_eq!(speech.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_embedding_uses_personalized_prosody() {
        let (pipeline, speech, store) = pipeline(FakeSpeech::new());
        let embedding = VoiceEmbedding::mock_from_sample("UklGRiQAAABXQVZF");
        let VoiceEmbedding::Mock { hash } = embedding else {
            unreachable!()
        };
        store.set("u2", VoiceCloneRecord::new(embedding));

        let outcome = pipeline.speak("u2", "Hallo", None).await.unwrap();

        let expected = PersonalizedVoice::from_hash(hash);
        assert_eq!(outcome.mode, SpeechMode::Personalized);
        let request = &speech.requests()[0];
        assert_eq!(request.speed, expected.speed);
        assert_eq!(request.pitch, expected.pitch);
    }

    #[tokio::test]
    async fn test_missing_clone_uses_standard_voice() {
        let (pipeline, _, _) = pipeline(FakeSpeech::new());

        let outcome = pipeline.speak("nobody", "Hallo", None).await.unwrap();

        assert_eq!(outcome.mode, SpeechMode::Standard);
        assert!(!outcome.used_voice_clone());
        assert!(outcome.fallback_reason.unwrap().contains("no voice clone"));
    }

    #[tokio::test]
    async fn test_standard_failure_is_an_error() {
        let (pipeline, _, _) = pipeline(FakeSpeech::new().failing_voice(STANDARD_VOICE_ID));

        let result = pipeline.speak("nobody", "Hallo", None).await;

        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
    }
}
