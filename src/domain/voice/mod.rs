//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 用户音色克隆记录
//! - Mock 嵌入与个性化参数
//! - 合成情绪选择

mod emotion;
mod value_objects;

pub use emotion::{Emotion, EmotionPicker};
pub use value_objects::{
    custom_voice_id, PersonalizedVoice, VoiceCloneRecord, VoiceEmbedding, DEFAULT_LANGUAGE,
    STANDARD_VOICE_ID,
};
