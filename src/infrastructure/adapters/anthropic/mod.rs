//! Anthropic Adapter - Messages API（视觉识别 + 角色文本）

mod messages_client;

pub use messages_client::*;
