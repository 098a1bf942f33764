//! Arkana - 猫咪塔罗的语音与识别后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Job Context: 远程任务的请求、结果与响应分类
//! - Card Context: 卡牌词表与识别降级决策
//! - Voice Context: 音色克隆记录、情绪选择
//! - Character Context: 测验角色
//! - Reading Context: 塔罗解读文本
//!
//! 应用层 (application/):
//! - Ports: 传输、视觉、文本、语音、朗读、克隆存储
//! - Jobs: 远程任务客户端、模型降级链、批量并发
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Wavespeed, Anthropic, RunPod, reqwest 传输
//! - Persistence: 音色克隆 JSON 文件

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{load_config, AppConfig};
