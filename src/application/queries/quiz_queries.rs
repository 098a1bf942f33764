//! Quiz Queries

/// 列出所有测验角色
#[derive(Debug, Clone)]
pub struct ListCharacters;
