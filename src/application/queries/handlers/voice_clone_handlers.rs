//! Voice Clone Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::VoiceCloneStorePort;
use crate::application::queries::GetVoiceCloneStatus;

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色克隆状态
#[derive(Debug, Clone)]
pub struct VoiceCloneStatus {
    pub user_id: String,
    pub has_voice_clone: bool,
    pub voice_id: Option<String>,
    pub mode: Option<&'static str>,
    pub created_at: Option<DateTime<Utc>>,
    pub sample_duration_secs: Option<u32>,
    pub language: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetVoiceCloneStatus Handler
pub struct GetVoiceCloneStatusHandler {
    store: Arc<dyn VoiceCloneStorePort>,
}

impl GetVoiceCloneStatusHandler {
    pub fn new(store: Arc<dyn VoiceCloneStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, query: GetVoiceCloneStatus) -> Result<VoiceCloneStatus, ApplicationError> {
        if query.user_id.trim().is_empty() {
            return Err(ApplicationError::validation("userId is required"));
        }

        let status = match self.store.get(&query.user_id) {
            Some(record) => VoiceCloneStatus {
                user_id: query.user_id,
                has_voice_clone: true,
                voice_id: record.embedding.voice_id().map(str::to_string),
                mode: Some(record.embedding.mode()),
                created_at: Some(record.created_at),
                sample_duration_secs: Some(record.sample_duration_secs),
                language: Some(record.language),
            },
            None => VoiceCloneStatus {
                user_id: query.user_id,
                has_voice_clone: false,
                voice_id: None,
                mode: None,
                created_at: None,
                sample_duration_secs: None,
                language: None,
            },
        };

        Ok(status)
    }
}
