//! Voice Clone Queries

/// 查询用户音色克隆状态
#[derive(Debug, Clone)]
pub struct GetVoiceCloneStatus {
    pub user_id: String,
}
