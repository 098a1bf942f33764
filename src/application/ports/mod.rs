//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod narration;
mod sleeper;
mod speech;
mod text_generation;
mod transport;
mod vision;
mod voice_clone_store;

pub use narration::{NarrationPort, NarrationRequest};
pub use sleeper::Sleeper;
pub use speech::{SpeechRequest, SpeechSynthesisPort, VoiceCloneRequest};
pub use text_generation::{TextGenerationPort, TextPrompt};
pub use transport::{JobTransportPort, TransportError};
pub use vision::{CardImage, VisionModelPort};
pub use voice_clone_store::{StoreError, VoiceCloneStorePort};
