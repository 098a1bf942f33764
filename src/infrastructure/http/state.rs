//! Application State
//!
//! 持有各端口以及所有 Command/Query Handlers

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AnswerQuizQuestionHandler, CharacterVoices, CreateVoiceCloneHandler, DeleteVoiceCloneHandler,
    GenerateReadingHandler, PregenerateQuizAnswersHandler, RecognizeCardHandler,
    SpeakWithCloneHandler, TestVoiceCloneHandler,
    // Query handlers
    GetVoiceCloneStatusHandler, ListCharactersHandler,
    // Pipeline
    ClonedSpeechPipeline,
    // Ports
    NarrationPort, SpeechSynthesisPort, TextGenerationPort, VisionModelPort, VoiceCloneStorePort,
};
use crate::domain::card::ModelVariant;
use crate::domain::RandomSource;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub speech: Arc<dyn SpeechSynthesisPort>,
    pub narration: Arc<dyn NarrationPort>,
    pub text: Arc<dyn TextGenerationPort>,
    pub voice_clones: Arc<dyn VoiceCloneStorePort>,

    // ========== Command Handlers ==========
    pub recognize_card_handler: RecognizeCardHandler,
    pub create_voice_clone_handler: CreateVoiceCloneHandler,
    pub delete_voice_clone_handler: DeleteVoiceCloneHandler,
    pub test_voice_clone_handler: TestVoiceCloneHandler,
    pub speak_with_clone_handler: SpeakWithCloneHandler,
    pub answer_quiz_handler: AnswerQuizQuestionHandler,
    pub pregenerate_quiz_handler: PregenerateQuizAnswersHandler,
    pub generate_reading_handler: GenerateReadingHandler,

    // ========== Query Handlers ==========
    pub voice_clone_status_handler: GetVoiceCloneStatusHandler,
    pub list_characters_handler: ListCharactersHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        vision: Arc<dyn VisionModelPort>,
        vision_variants: Vec<ModelVariant>,
        text: Arc<dyn TextGenerationPort>,
        speech: Arc<dyn SpeechSynthesisPort>,
        narration: Arc<dyn NarrationPort>,
        voice_clones: Arc<dyn VoiceCloneStorePort>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let pipeline = Arc::new(ClonedSpeechPipeline::new(
            speech.clone(),
            voice_clones.clone(),
            random.clone(),
        ));
        let voices = Arc::new(CharacterVoices::new(
            text.clone(),
            speech.clone(),
            pipeline.clone(),
            random.clone(),
        ));

        Self {
            // Ports
            speech: speech.clone(),
            narration: narration.clone(),
            text,
            voice_clones: voice_clones.clone(),

            // Command handlers
            recognize_card_handler: RecognizeCardHandler::new(vision, vision_variants),
            create_voice_clone_handler: CreateVoiceCloneHandler::new(speech, voice_clones.clone()),
            delete_voice_clone_handler: DeleteVoiceCloneHandler::new(voice_clones.clone()),
            test_voice_clone_handler: TestVoiceCloneHandler::new(pipeline.clone(), random),
            speak_with_clone_handler: SpeakWithCloneHandler::new(pipeline),
            answer_quiz_handler: AnswerQuizQuestionHandler::new(voices.clone()),
            pregenerate_quiz_handler: PregenerateQuizAnswersHandler::new(
                voices,
                voice_clones.clone(),
            ),
            generate_reading_handler: GenerateReadingHandler::new(narration),

            // Query handlers
            voice_clone_status_handler: GetVoiceCloneStatusHandler::new(voice_clones),
            list_characters_handler: ListCharactersHandler::new(),
        }
    }
}
