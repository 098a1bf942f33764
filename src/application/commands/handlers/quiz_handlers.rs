//! Quiz Command Handlers - 角色回答与语音

use std::sync::Arc;
use std::time::Instant;

use crate::application::commands::{
    AnswerQuizQuestion, AnswerQuizQuestionResponse, AnswerSource, CharacterAnswer,
    PregenerateQuizAnswers, PregenerateQuizAnswersResponse,
};
use crate::application::error::ApplicationError;
use crate::application::jobs::fan_out;
use crate::application::ports::{
    SpeechRequest, SpeechSynthesisPort, TextGenerationPort, TextPrompt, VoiceCloneStorePort,
};
use crate::application::speech::ClonedSpeechPipeline;
use crate::domain::character::{Character, DEFAULT_PLAYER_NAME};
use crate::domain::job::JobError;
use crate::domain::random::RandomSource;
use crate::domain::voice::{VoiceCloneRecord, VoiceEmbedding};

/// 角色文本与语音的生成，两个 handler 共用
pub struct CharacterVoices {
    text: Arc<dyn TextGenerationPort>,
    speech: Arc<dyn SpeechSynthesisPort>,
    pipeline: Arc<ClonedSpeechPipeline>,
    random: Arc<dyn RandomSource>,
}

impl CharacterVoices {
    pub fn new(
        text: Arc<dyn TextGenerationPort>,
        speech: Arc<dyn SpeechSynthesisPort>,
        pipeline: Arc<ClonedSpeechPipeline>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            text,
            speech,
            pipeline,
            random,
        }
    }

    async fn generate_answer(
        &self,
        character: &Character,
        question: &str,
        user_name: &str,
    ) -> Result<String, JobError> {
        if !self.text.is_configured() {
            return Err(JobError::provider("text generation not configured"));
        }
        let prompt = TextPrompt {
            system: character.system_prompt.to_string(),
            user: character.answer_prompt(question, user_name),
        };
        self.text.generate(&prompt).await.map(|answer| answer.trim().to_string())
    }

    /// 生成失败时使用预置回答
    fn answer_or_fallback(
        &self,
        character: &Character,
        user_name: &str,
        result: Result<String, String>,
    ) -> (String, AnswerSource) {
        match result {
            Ok(answer) if !answer.is_empty() => (answer, AnswerSource::Generated),
            Ok(_) => (
                character.fallback_answer(user_name, self.random.as_ref()),
                AnswerSource::Fallback,
            ),
            Err(e) => {
                tracing::warn!(character = character.name, error = %e, "Using fallback answer");
                (
                    character.fallback_answer(user_name, self.random.as_ref()),
                    AnswerSource::Fallback,
                )
            }
        }
    }

    /// 角色自己的音色
    async fn character_voice(&self, character: &Character, text: &str) -> Result<String, JobError> {
        let request = SpeechRequest::new(text, character.available_voice_id(), character.voice.emotion)
            .with_prosody(character.voice.speed, character.voice.pitch)
            .with_volume(character.voice.volume);
        self.speech.synthesize(&request).await
    }

    /// 用户有克隆音色时优先使用，返回 (音频地址, 是否使用了克隆音色)
    async fn voice_with_clone(
        &self,
        character: &Character,
        text: &str,
        user_id: &str,
    ) -> Result<(String, bool), JobError> {
        if self.pipeline.has_clone(user_id) {
            match self
                .pipeline
                .speak(user_id, text, Some(character.voice.emotion))
                .await
            {
                Ok(outcome) => return Ok((outcome.audio_url.clone(), outcome.used_voice_clone())),
                Err(e) => {
                    tracing::warn!(
                        character = character.name,
                        user_id,
                        error = %e,
                        "Voice clone failed, using character voice"
                    );
                }
            }
        }
        self.character_voice(character, text)
            .await
            .map(|url| (url, false))
    }
}

fn find_character(name: &str) -> Result<&'static Character, ApplicationError> {
    Character::find(name).ok_or_else(|| ApplicationError::not_found("Character", name))
}

fn user_name_or_default(user_name: Option<String>) -> String {
    user_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
}

// ============================================================================
// AnswerQuizQuestion
// ============================================================================

/// AnswerQuizQuestion Handler
pub struct AnswerQuizQuestionHandler {
    voices: Arc<CharacterVoices>,
}

impl AnswerQuizQuestionHandler {
    pub fn new(voices: Arc<CharacterVoices>) -> Self {
        Self { voices }
    }

    pub async fn handle(
        &self,
        command: AnswerQuizQuestion,
    ) -> Result<AnswerQuizQuestionResponse, ApplicationError> {
        let character = find_character(&command.character)?;
        if command.question.trim().is_empty() {
            return Err(ApplicationError::validation("question is required"));
        }
        let user_name = user_name_or_default(command.user_name);

        let generated = self
            .voices
            .generate_answer(character, &command.question, &user_name)
            .await
            .map_err(|e| e.to_string());
        let (answer, answer_source) = self.voices.answer_or_fallback(character, &user_name, generated);

        let voice = self.voices.character_voice(character, &answer).await;
        let (audio_url, error) = match voice {
            Ok(url) => (Some(url), None),
            Err(e) => {
                tracing::warn!(character = character.name, error = %e, "Character voice failed");
                (None, Some(e.to_string()))
            }
        };

        Ok(AnswerQuizQuestionResponse {
            question: command.question,
            answer: CharacterAnswer {
                character: character.name,
                emoji: character.emoji,
                personality: character.personality,
                answer,
                answer_source,
                success: audio_url.is_some(),
                audio_url,
                used_voice_clone: false,
                error,
            },
        })
    }
}

// ============================================================================
// PregenerateQuizAnswers
// ============================================================================

/// PregenerateQuizAnswers Handler
///
/// 先并发生成所有角色的文本，再并发生成语音；单个角色失败只影响自己
pub struct PregenerateQuizAnswersHandler {
    voices: Arc<CharacterVoices>,
    store: Arc<dyn VoiceCloneStorePort>,
}

impl PregenerateQuizAnswersHandler {
    pub fn new(voices: Arc<CharacterVoices>, store: Arc<dyn VoiceCloneStorePort>) -> Self {
        Self { voices, store }
    }

    pub async fn handle(
        &self,
        command: PregenerateQuizAnswers,
    ) -> Result<PregenerateQuizAnswersResponse, ApplicationError> {
        if command.question.trim().is_empty() {
            return Err(ApplicationError::validation("question is required"));
        }
        if command.user_id.trim().is_empty() {
            return Err(ApplicationError::validation("userId is required"));
        }

        let started = Instant::now();
        let user_name = user_name_or_default(command.user_name);
        self.register_known_voice(&command.user_id, command.voice_id)
            .await?;

        let characters = Character::all();

        let texts = fan_out(
            "quiz-text",
            characters
                .iter()
                .map(|c| self.voices.generate_answer(c, &command.question, &user_name))
                .collect(),
        )
        .await;

        let answers: Vec<(String, AnswerSource)> = characters
            .iter()
            .zip(texts)
            .map(|(character, branch)| {
                let result = match (branch.value, branch.error) {
                    (Some(answer), _) => Ok(answer),
                    (None, error) => Err(error.unwrap_or_default()),
                };
                self.voices.answer_or_fallback(character, &user_name, result)
            })
            .collect();

        let audio = fan_out(
            "quiz-voice",
            characters
                .iter()
                .zip(&answers)
                .map(|(c, (answer, _))| self.voices.voice_with_clone(c, answer, &command.user_id))
                .collect(),
        )
        .await;

        let answers: Vec<CharacterAnswer> = characters
            .iter()
            .zip(answers)
            .zip(audio)
            .map(|((character, (answer, answer_source)), branch)| {
                let (audio_url, used_voice_clone) = match branch.value {
                    Some((url, cloned)) => (Some(url), cloned),
                    None => (None, false),
                };
                CharacterAnswer {
                    character: character.name,
                    emoji: character.emoji,
                    personality: character.personality,
                    answer,
                    answer_source,
                    audio_url,
                    used_voice_clone,
                    success: branch.success,
                    error: branch.error,
                }
            })
            .collect();

        let generation_time_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            user_id = %command.user_id,
            succeeded = answers.iter().filter(|a| a.success).count(),
            with_clone = answers.iter().filter(|a| a.used_voice_clone).count(),
            generation_time_ms,
            "Quiz answers pregenerated"
        );

        Ok(PregenerateQuizAnswersResponse {
            question: command.question,
            user_id: command.user_id,
            generation_time_ms,
            answers,
        })
    }

    /// 客户端带来了克隆音色 ID 而服务端没有记录时补登记
    async fn register_known_voice(
        &self,
        user_id: &str,
        voice_id: Option<String>,
    ) -> Result<(), ApplicationError> {
        let Some(voice_id) = voice_id.filter(|v| !v.trim().is_empty()) else {
            return Ok(());
        };
        if self.store.contains(user_id) {
            return Ok(());
        }

        tracing::info!(user_id, voice_id = %voice_id, "Registering client-provided voice clone");
        self.store.set(
            user_id,
            VoiceCloneRecord::new(VoiceEmbedding::WavespeedMinimax {
                voice_id,
                preview_url: None,
            }),
        );
        self.store.persist().await?;
        Ok(())
    }
}
