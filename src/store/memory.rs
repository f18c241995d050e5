//! In-memory progress store
//!
//! Fallback backend when local storage is unavailable, and the workhorse for
//! tests. Same semantics as the file store, minus durability.

use super::{Ack, ProgressStore, ReportSummary, StoreData, StoreError};
use crate::data::{ModuleId, StudentProfile};
use chrono::{DateTime, Utc};

#[derive(Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn record_completion(
        &mut self,
        student_id: &str,
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        duration_secs: f64,
    ) -> Result<Ack, StoreError> {
        Ok(self
            .data
            .apply_completion(student_id, module, score, gems_earned, duration_secs))
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
        self.data.append_session(student_id, start_time, end_time);
        Ok(())
    }

    fn aggregate_report(&self) -> Result<ReportSummary, StoreError> {
        Ok(self.data.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gems_accumulate_across_modules() {
        let mut store = MemoryStore::new();
        store
            .record_completion("ana", ModuleId::PhonicsForest, 50, 5, 60.0)
            .unwrap();
        let ack = store
            .record_completion("ana", ModuleId::SentenceSummit, 30, 3, 90.0)
            .unwrap();
        assert_eq!(ack.total_gems, 8);
    }
}
