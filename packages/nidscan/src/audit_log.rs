//! Durable, newest-first list of completed onboardings.
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::AuditError;
use crate::model::{NidStatus, OnboardingRecord};

/// Aggregate figures shown alongside the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total: usize,
    pub verified: usize,
    pub rejected: usize,
    /// Rejected share of all records, 0.0 when the log is empty.
    pub rejection_rate: f64,
}

pub struct AuditLog {
    path: PathBuf,
    records: Vec<OnboardingRecord>,
}

impl AuditLog {
    /// Loads the log at `path`. A missing file is an empty log.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let path = path.into();
        let records = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| AuditError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(AuditError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), records = records.len(), "audit log loaded");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records, most recent first.
    pub fn records(&self) -> &[OnboardingRecord] {
        &self.records
    }

    /// Puts `record` at the head of the log and writes the whole log out. The
    /// file is replaced atomically, so a crash never leaves it half written.
    /// On a write failure the in-memory log is left as it was.
    pub async fn append(&mut self, record: OnboardingRecord) -> Result<(), AuditError> {
        self.records.insert(0, record);
        if let Err(e) = self.persist().await {
            self.records.remove(0);
            return Err(e);
        }
        tracing::info!(path = %self.path.display(), records = self.records.len(), "audit record appended");
        Ok(())
    }

    async fn persist(&self) -> Result<(), AuditError> {
        let io_err = |source: std::io::Error| AuditError::Io {
            path: self.path.clone(),
            source,
        };
        let json = serde_json::to_vec_pretty(&self.records).map_err(|source| AuditError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let file = async {
            use tokio::io::AsyncWriteExt;
            let mut f = fs::File::create(&tmp).await?;
            f.write_all(&json).await?;
            f.sync_all().await
        };
        file.await.map_err(io_err)?;
        fs::rename(&tmp, &self.path).await.map_err(io_err)
    }

    pub fn stats(&self) -> AuditStats {
        let total = self.records.len();
        let count = |status: NidStatus| self.records.iter().filter(|r| r.nid_status == status).count();
        let verified = count(NidStatus::Verified);
        let rejected = count(NidStatus::Rejected);
        let rejection_rate = if total == 0 {
            0.0
        } else {
            rejected as f64 / total as f64
        };
        AuditStats {
            total,
            verified,
            rejected,
            rejection_rate,
        }
    }
}
