//! Teacher dashboard gate and report presentation

use crate::data::ModuleId;
use crate::store::ReportSummary;

/// Password gate in front of the dashboard.
///
/// Verification is a plain comparison; the credential only keeps students
/// out of the report screen on a shared classroom device.
pub struct TeacherGate {
    secret: String,
}

impl TeacherGate {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    pub fn verify(&self, attempt: &str) -> bool {
        attempt == self.secret
    }
}

/// Turns a report into the rows the dashboard screen draws.
pub struct DashboardView<'a> {
    report: &'a ReportSummary,
}

impl<'a> DashboardView<'a> {
    pub fn new(report: &'a ReportSummary) -> Self {
        Self { report }
    }

    /// One row per student: id, gems, modules completed.
    pub fn student_rows(&self) -> Vec<[String; 3]> {
        self.report
            .students
            .iter()
            .map(|s| {
                let completed = s.modules.values().filter(|r| r.completed).count();
                [
                    s.student_id.clone(),
                    s.total_gems.to_string(),
                    format!("{completed}/{}", ModuleId::all().len()),
                ]
            })
            .collect()
    }

    /// One row per module with any completions: title, count, average best
    /// score, average time.
    pub fn module_rows(&self) -> Vec<[String; 4]> {
        self.report
            .per_module
            .iter()
            .map(|(module, agg)| {
                [
                    module.title().to_string(),
                    agg.completions.to_string(),
                    format!("{:.0}", agg.avg_best_score),
                    format_duration(agg.avg_time_secs),
                ]
            })
            .collect()
    }

    pub fn session_summary(&self) -> String {
        format!(
            "{} sessions, {} total",
            self.report.total_sessions,
            format_duration(self.report.total_session_secs)
        )
    }
}

fn format_duration(secs: f64) -> String {
    let total = secs.round() as u64;
    if total >= 60 {
        format!("{}m {:02}s", total / 60, total % 60)
    } else {
        format!("{total}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreData;

    #[test]
    fn gate_matches_exact_password_only() {
        let gate = TeacherGate::new("konekta2026");
        assert!(gate.verify("konekta2026"));
        assert!(!gate.verify("Konekta2026"));
        assert!(!gate.verify(""));
    }

    #[test]
    fn view_rows_cover_students_and_modules() {
        let mut data = StoreData::default();
        data.apply_completion("ana", ModuleId::PhonicsForest, 80, 8, 95.0);
        data.apply_completion("ben", ModuleId::PhonicsForest, 60, 6, 65.0);
        let report = data.report();
        let view = DashboardView::new(&report);

        let students = view.student_rows();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0], ["ana".to_string(), "8".to_string(), "1/5".to_string()]);

        let modules = view.module_rows();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0][1], "2");
        assert_eq!(modules[0][2], "70");
        assert_eq!(modules[0][3], "1m 20s");
    }

    #[test]
    fn short_durations_render_as_seconds() {
        assert_eq!(format_duration(42.4), "42s");
        assert_eq!(format_duration(60.0), "1m 00s");
    }
}
