//! Student progress records

use super::{Id, ModuleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the suite remembers about one student.
///
/// Profiles are created on first session start and only ever appended to or
/// updated in place; nothing here is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,

    /// Cumulative Knowledge Gems across all completions.
    pub total_gems: u32,

    /// At most one record per module; later attempts update in place.
    pub modules: HashMap<ModuleId, ModuleRecord>,
}

/// Completion record for one (student, module) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub module: ModuleId,
    pub completed: bool,
    pub best_score: u32,
    pub attempts: u32,
    pub time_spent_secs: f64,
    pub last_attempt: DateTime<Utc>,
}

impl ModuleRecord {
    fn fresh(module: ModuleId, now: DateTime<Utc>) -> Self {
        Self {
            module,
            completed: false,
            best_score: 0,
            attempts: 0,
            time_spent_secs: 0.0,
            last_attempt: now,
        }
    }
}

impl StudentProfile {
    /// A blank profile, used on first login and as the safe fallback when
    /// the store is unavailable.
    pub fn empty(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            total_gems: 0,
            modules: HashMap::new(),
        }
    }

    pub fn record(&self, module: ModuleId) -> Option<&ModuleRecord> {
        self.modules.get(&module)
    }

    /// Fold a completion into the profile.
    ///
    /// Best score and time are overwritten only when the module was not yet
    /// completed or the new score beats the stored best; attempts and gems
    /// always accumulate. Returns true when the stored best improved.
    pub fn apply_completion(
        &mut self,
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        duration_secs: f64,
        now: DateTime<Utc>,
    ) -> bool {
        let record = self
            .modules
            .entry(module)
            .or_insert_with(|| ModuleRecord::fresh(module, now));

        record.attempts += 1;
        record.last_attempt = now;

        let improved = !record.completed || score > record.best_score;
        if improved {
            record.best_score = score;
            record.time_spent_secs = duration_secs;
        }
        record.completed = true;

        self.total_gems += gems_earned;
        improved
    }
}

/// Immutable record of one login/logout, appended once at session end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub id: Id,
    pub student_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_secs: f64,
}

impl SessionLogEntry {
    pub fn new(student_id: &str, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        let duration_secs = (end_time - start_time).num_milliseconds() as f64 / 1000.0;
        Self {
            id: Id::new(),
            student_id: student_id.to_string(),
            start_time,
            end_time,
            duration_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_never_decreases() {
        let mut profile = StudentProfile::empty("demo");
        let now = Utc::now();

        assert!(profile.apply_completion(ModuleId::PhonicsForest, 80, 8, 120.0, now));
        assert!(!profile.apply_completion(ModuleId::PhonicsForest, 50, 5, 90.0, now));

        let record = profile.record(ModuleId::PhonicsForest).unwrap();
        assert_eq!(record.best_score, 80);
        assert_eq!(record.time_spent_secs, 120.0);
        assert_eq!(record.attempts, 2);
        // Gems accumulate even when the best score does not improve.
        assert_eq!(profile.total_gems, 13);
    }

    #[test]
    fn one_record_per_module() {
        let mut profile = StudentProfile::empty("demo");
        let now = Utc::now();
        profile.apply_completion(ModuleId::StorySea, 10, 1, 30.0, now);
        profile.apply_completion(ModuleId::StorySea, 20, 2, 40.0, now);
        assert_eq!(profile.modules.len(), 1);
        assert_eq!(profile.record(ModuleId::StorySea).unwrap().best_score, 20);
    }

    #[test]
    fn session_duration_from_bounds() {
        let start = Utc::now();
        let end = start + chrono::Duration::seconds(90);
        let entry = SessionLogEntry::new("demo", start, end);
        assert_eq!(entry.duration_secs, 90.0);
    }
}
