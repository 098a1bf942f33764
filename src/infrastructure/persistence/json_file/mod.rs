//! JSON File Persistence - 单文件 JSON 存储

mod voice_clone_store;

pub use voice_clone_store::JsonFileVoiceCloneStore;
