//! File-backed progress store
//!
//! The whole store is one JSON document. Every mutation rewrites it through
//! a temp-file-and-rename so a crash leaves either the old record set or the
//! new one, never a partial write.

use super::{Ack, ProgressStore, ReportSummary, StoreData, StoreError};
use crate::data::{ModuleId, StudentProfile};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileStore {
    path: PathBuf,
    data: StoreData,
}

impl FileStore {
    /// Open the store, creating an empty one when the file does not exist.
    ///
    /// An unreadable file yields `CorruptRecord` and the caller decides how
    /// to degrade; the file on disk is left untouched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| StoreError::IoFailure(e.to_string()))?;
            serde_json::from_str(&raw)
                .map_err(|e| StoreError::CorruptRecord(e.to_string()))?
        } else {
            StoreData::default()
        };
        Ok(Self { path, data })
    }

    /// Write the record sets durably: temp file in the same directory,
    /// fsync, then rename over the live file.
    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| StoreError::IoFailure(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file =
            File::create(&tmp).map_err(|e| StoreError::IoFailure(e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| StoreError::IoFailure(e.to_string()))?;
        file.sync_all()
            .map_err(|e| StoreError::IoFailure(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::IoFailure(e.to_string()))?;
        Ok(())
    }
}

impl ProgressStore for FileStore {
    fn record_completion(
        &mut self,
        student_id: &str,
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        duration_secs: f64,
    ) -> Result<Ack, StoreError> {
        let before = self.data.clone();
        let ack = self
            .data
            .apply_completion(student_id, module, score, gems_earned, duration_secs);
        if let Err(e) = self.persist() {
            // Failed writes must not leave a phantom in-memory record.
            self.data = before;
            tracing::warn!(student_id, %module, "completion write failed: {e}");
            return Err(e);
        }
        tracing::info!(
            student_id,
            %module,
            score,
            gems_earned,
            "completion recorded"
        );
        Ok(ack)
    }

    fn get_profile(&self, student_id: &str) -> Result<StudentProfile, StoreError> {
        self.data.profile(student_id)
    }

    fn append_session(
        &mut self,
        student_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let before = self.data.sessions.len();
        self.data.append_session(student_id, start_time, end_time);
        if let Err(e) = self.persist() {
            self.data.sessions.truncate(before);
            return Err(e);
        }
        Ok(())
    }

    fn aggregate_report(&self) -> Result<ReportSummary, StoreError> {
        Ok(self.data.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn completions_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store
                .record_completion("ana", ModuleId::PhonicsForest, 70, 7, 45.0)
                .unwrap();
            let start = Utc::now();
            store
                .append_session("ana", start, start + Duration::seconds(60))
                .unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        let profile = store.get_profile("ana").unwrap();
        assert_eq!(profile.total_gems, 7);
        assert_eq!(
            profile.record(ModuleId::PhonicsForest).unwrap().best_score,
            70
        );
        let report = store.aggregate_report().unwrap();
        assert_eq!(report.total_sessions, 1);
        assert_eq!(report.total_session_secs, 60.0);
    }

    #[test]
    fn lower_score_keeps_stored_best() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let mut store = FileStore::open(&path).unwrap();

        store
            .record_completion("ana", ModuleId::StorySea, 90, 9, 30.0)
            .unwrap();
        let ack = store
            .record_completion("ana", ModuleId::StorySea, 40, 4, 20.0)
            .unwrap();

        assert!(!ack.improved_best);
        let record = store.get_profile("ana").unwrap();
        assert_eq!(record.record(ModuleId::StorySea).unwrap().best_score, 90);
    }

    #[test]
    fn garbage_file_reports_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::CorruptRecord(_))
        ));
    }

    #[test]
    fn empty_store_read_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("progress.json")).unwrap();
        assert!(matches!(
            store.get_profile("ghost"),
            Err(StoreError::NotFound(_))
        ));
    }
}
