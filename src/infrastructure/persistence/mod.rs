//! Persistence Layer - 数据持久化
//!
//! 音色克隆注册表的 JSON 文件实现

pub mod json_file;

pub use json_file::JsonFileVoiceCloneStore;
