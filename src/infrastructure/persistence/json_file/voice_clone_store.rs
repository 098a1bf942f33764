//! JSON File Voice Clone Store
//!
//! 内存中是 `DashMap<user_id, VoiceCloneRecord>`，落盘为一个格式化的 JSON 对象。
//! `persist` 先写临时文件再 rename，整体替换旧快照；写盘过程由 `write_lock` 串行化

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::application::ports::{StoreError, VoiceCloneStorePort};
use crate::domain::voice::VoiceCloneRecord;

/// 基于 JSON 文件的音色克隆注册表
pub struct JsonFileVoiceCloneStore {
    path: PathBuf,
    records: DashMap<String, VoiceCloneRecord>,
    /// 快照 + 写临时文件 + rename 整体互斥
    write_lock: Mutex<()>,
}

impl JsonFileVoiceCloneStore {
    /// 加载已有文件；文件不存在时为空注册表
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = DashMap::new();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let stored: BTreeMap<String, VoiceCloneRecord> = serde_json::from_slice(&bytes)?;
                for (user_id, record) in stored {
                    tracing::debug!(
                        user_id = %user_id,
                        voice_id = record.embedding.voice_id().unwrap_or("-"),
                        "Loaded voice clone"
                    );
                    records.insert(user_id, record);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(path = %path.display(), count = records.len(), "Voice clone store opened");

        Ok(Self {
            path,
            records,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> BTreeMap<String, VoiceCloneRecord> {
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[async_trait]
impl VoiceCloneStorePort for JsonFileVoiceCloneStore {
    fn get(&self, user_id: &str) -> Option<VoiceCloneRecord> {
        self.records.get(user_id).map(|r| r.value().clone())
    }

    fn set(&self, user_id: &str, record: VoiceCloneRecord) {
        self.records.insert(user_id.to_string(), record);
    }

    fn delete(&self, user_id: &str) -> Option<VoiceCloneRecord> {
        self.records.remove(user_id).map(|(_, record)| record)
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.snapshot();
        let json = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::info!(count = snapshot.len(), path = %self.path.display(), "Voice clones saved");
        Ok(())
    }
}
