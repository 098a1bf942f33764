//! Character Context - 测验角色限界上下文

mod catalog;

pub use catalog::{Character, CharacterVoice, CHARACTERS, DEFAULT_PLAYER_NAME};
