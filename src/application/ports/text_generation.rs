//! Text Generation Port - 角色回答文本生成

use async_trait::async_trait;

use crate::domain::job::JobError;

/// 文本生成请求
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub system: String,
    pub user: String,
}

#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    async fn generate(&self, prompt: &TextPrompt) -> Result<String, JobError>;

    /// 未配置 API key 时调用方直接使用预置回答
    fn is_configured(&self) -> bool {
        true
    }
}
