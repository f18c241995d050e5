//! Progress store
//!
//! Durable per-student records: module completions, cumulative gem totals,
//! and the append-only session log. A file-backed store is the normal path;
//! the in-memory store is the crash-safe fallback when local storage is
//! unavailable.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::data::{ModuleId, SessionLogEntry, StudentProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Storage failures. All of these are non-fatal to a running session.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("unknown student: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    IoFailure(String),

    #[error("unreadable stored data: {0}")]
    CorruptRecord(String),
}

/// Acknowledgement of a durable completion write.
#[derive(Debug, Clone)]
pub struct Ack {
    /// Whether the stored best score improved.
    pub improved_best: bool,
    /// Cumulative gems for the student after this write.
    pub total_gems: u32,
}

/// Per-module aggregates across all students.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleAggregate {
    pub completions: u32,
    pub avg_best_score: f64,
    pub avg_time_secs: f64,
}

/// Read-only report for the teacher dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub students: Vec<StudentProfile>,
    pub per_module: BTreeMap<ModuleId, ModuleAggregate>,
    pub total_sessions: usize,
    pub total_session_secs: f64,
}

/// Contract shared by every store backend.
///
/// Writes are durable before the call returns and atomic per record; a
/// `&mut self` receiver keeps writes for a student serialized.
pub trait ProgressStore {
    /// Record a module completion. Best score and time are retained
    /// monotonically; gems always accumulate.
    fn record_completion(
        &mut self,
        student_id: &str,
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        duration_secs: f64,
    ) -> Result<Ack, StoreError>;

    fn get_profile(&self, student_id: &str) -> Result<StudentProfile, StoreError>;

    /// Append one immutable session log entry.
    fn append_session(
        &mut self,
        student_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    fn aggregate_report(&self) -> Result<ReportSummary, StoreError>;
}

/// The persisted record sets, shared by both backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    pub students: HashMap<String, StudentProfile>,
    pub sessions: Vec<SessionLogEntry>,
}

impl StoreData {
    pub fn apply_completion(
        &mut self,
        student_id: &str,
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        duration_secs: f64,
    ) -> Ack {
        let profile = self
            .students
            .entry(student_id.to_string())
            .or_insert_with(|| StudentProfile::empty(student_id));
        let improved_best =
            profile.apply_completion(module, score, gems_earned, duration_secs, Utc::now());
        Ack {
            improved_best,
            total_gems: profile.total_gems,
        }
    }

    pub fn profile(&self, student_id: &str) -> Result<StudentProfile, StoreError> {
        self.students
            .get(student_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(student_id.to_string()))
    }

    pub fn append_session(
        &mut self,
        student_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) {
        self.sessions
            .push(SessionLogEntry::new(student_id, start_time, end_time));
    }

    pub fn report(&self) -> ReportSummary {
        let mut per_module: BTreeMap<ModuleId, ModuleAggregate> = BTreeMap::new();
        let mut counts: BTreeMap<ModuleId, u32> = BTreeMap::new();

        for profile in self.students.values() {
            for record in profile.modules.values() {
                if !record.completed {
                    continue;
                }
                let agg = per_module.entry(record.module).or_default();
                agg.completions += 1;
                agg.avg_best_score += record.best_score as f64;
                agg.avg_time_secs += record.time_spent_secs;
                *counts.entry(record.module).or_default() += 1;
            }
        }
        for (module, agg) in per_module.iter_mut() {
            let n = counts.get(module).copied().unwrap_or(0).max(1) as f64;
            agg.avg_best_score /= n;
            agg.avg_time_secs /= n;
        }

        let mut students: Vec<StudentProfile> = self.students.values().cloned().collect();
        students.sort_by(|a, b| a.student_id.cmp(&b.student_id));

        ReportSummary {
            generated_at: Utc::now(),
            students,
            per_module,
            total_sessions: self.sessions.len(),
            total_session_secs: self.sessions.iter().map(|s| s.duration_secs).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn report_session_totals_match_log() {
        let mut data = StoreData::default();
        let start = Utc::now();
        data.append_session("ana", start, start + Duration::seconds(30));
        data.append_session("ben", start, start + Duration::seconds(45));
        data.append_session("ana", start, start + Duration::seconds(25));

        let report = data.report();
        assert_eq!(report.total_sessions, 3);
        assert_eq!(report.total_session_secs, 100.0);
    }

    #[test]
    fn report_module_averages() {
        let mut data = StoreData::default();
        data.apply_completion("ana", ModuleId::PhonicsForest, 80, 8, 100.0);
        data.apply_completion("ben", ModuleId::PhonicsForest, 60, 6, 50.0);

        let report = data.report();
        let agg = &report.per_module[&ModuleId::PhonicsForest];
        assert_eq!(agg.completions, 2);
        assert_eq!(agg.avg_best_score, 70.0);
        assert_eq!(agg.avg_time_secs, 75.0);
    }

    #[test]
    fn unknown_student_is_not_found() {
        let data = StoreData::default();
        assert!(matches!(
            data.profile("ghost"),
            Err(StoreError::NotFound(_))
        ));
    }
}
