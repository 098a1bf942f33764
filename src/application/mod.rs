//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（传输、视觉、文本、语音、朗读、克隆存储）
//! - jobs: 远程任务客户端、模型降级链、批量并发
//! - speech: 克隆音色合成的降级编排
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod jobs;
pub mod ports;
pub mod queries;
pub mod speech;

// Re-exports
pub use commands::{
    // Card commands
    RecognizeCard,
    RecognizeCardResponse,
    // Voice clone commands
    CreateVoiceClone,
    CreateVoiceCloneResponse,
    DeleteVoiceClone,
    DeleteVoiceCloneResponse,
    SpeakWithClone,
    TestVoiceClone,
    // Quiz commands
    AnswerQuizQuestion,
    AnswerQuizQuestionResponse,
    AnswerSource,
    CharacterAnswer,
    PregenerateQuizAnswers,
    PregenerateQuizAnswersResponse,
    // Reading commands
    GenerateReading,
    GenerateReadingResponse,
    ReadingSegment,
    // Handlers
    handlers::{
        AnswerQuizQuestionHandler, CharacterVoices, CreateVoiceCloneHandler,
        DeleteVoiceCloneHandler, GenerateReadingHandler, PregenerateQuizAnswersHandler,
        RecognizeCardHandler, SpeakWithCloneHandler, TestVoiceCloneHandler,
    },
};

pub use error::ApplicationError;

pub use jobs::{fan_out, recognize_with_fallback, BranchOutcome, RecognitionOutcome, RemoteJobClient};

pub use ports::{
    CardImage, JobTransportPort, NarrationPort, NarrationRequest, Sleeper, SpeechRequest,
    SpeechSynthesisPort, StoreError, TextGenerationPort, TextPrompt, TransportError,
    VisionModelPort, VoiceCloneRequest, VoiceCloneStorePort,
};

pub use queries::{
    GetVoiceCloneStatus,
    ListCharacters,
    // Handlers
    handlers::{GetVoiceCloneStatusHandler, ListCharactersHandler, VoiceCloneStatus},
};

pub use speech::{ClonedSpeechPipeline, SpeechMode, SpeechOutcome};
