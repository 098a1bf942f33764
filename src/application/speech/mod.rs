//! Speech - 带降级的语音合成编排

mod cloned;

pub use cloned::{ClonedSpeechPipeline, SpeechMode, SpeechOutcome};
