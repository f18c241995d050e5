//! Game controller
//!
//! Owns the screen state machine: hub menu, active mini-game, completion
//! summary, and the teacher dashboard. Every transition funnels through here;
//! the TUI layer renders whatever screen the controller says and forwards raw
//! input back in.

pub mod dashboard;
pub mod engines;
pub mod unlock;

use crate::data::{GameConfig, ModuleId, StudentProfile};
use crate::store::{ProgressStore, ReportSummary, StoreError};
use chrono::{DateTime, Utc};
use engines::{ActiveEngine, Advisory, EngineInput, EngineOutcome};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use dashboard::TeacherGate;
use unlock::accessible_modules;

/// What the player is looking at.
#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    InGame(ModuleId),
    ModuleComplete {
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        improved_best: bool,
        new_unlocks: Vec<ModuleId>,
    },
    /// Entry denied: the module needs more gems than the student has.
    Locked { module: ModuleId, needed: u32 },
    TeacherDashboard(ReportSummary),
}

pub struct Controller {
    config: GameConfig,
    store: Box<dyn ProgressStore>,
    gate: TeacherGate,

    screen: Screen,
    engine: Option<ActiveEngine>,

    student_id: String,
    gems: u32,
    accessible: BTreeSet<ModuleId>,
    session_start: DateTime<Utc>,
    notices: Vec<String>,
}

impl Controller {
    /// Build the controller from config and a store backend.
    ///
    /// A store that cannot produce the student's profile never blocks play:
    /// the session starts from an empty profile and a notice explains why.
    pub fn new(config: GameConfig, store: Box<dyn ProgressStore>) -> Self {
        let student_id = config.student_id.clone();
        let mut notices = Vec::new();
        let profile = match store.get_profile(&student_id) {
            Ok(profile) => profile,
            Err(StoreError::NotFound(_)) => StudentProfile::empty(&student_id),
            Err(e) => {
                warn!(error = %e, "could not load saved progress, starting fresh");
                notices.push("Saved progress could not be read, starting fresh".to_string());
                StudentProfile::empty(&student_id)
            }
        };
        let gems = profile.total_gems;
        let accessible = accessible_modules(gems, &config.thresholds);
        let gate = TeacherGate::new(&config.teacher_password);
        info!(student = %student_id, gems, "session started");

        Self {
            config,
            store,
            gate,
            screen: Screen::Menu,
            engine: None,
            student_id,
            gems,
            accessible,
            session_start: Utc::now(),
            notices,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn engine(&self) -> Option<&ActiveEngine> {
        self.engine.as_ref()
    }

    pub fn gems(&self) -> u32 {
        self.gems
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn accessible(&self) -> &BTreeSet<ModuleId> {
        &self.accessible
    }

    /// Drain queued notices for display.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Enter a module from the hub. Denied entries never touch the store.
    pub fn select_module(&mut self, module: ModuleId) {
        if !self.accessible.contains(&module) {
            let needed = self.config.threshold(module);
            self.notices.push(format!(
                "{} opens at {} gems, you have {}",
                module.title(),
                needed,
                self.gems
            ));
            self.screen = Screen::Locked { module, needed };
            return;
        }
        match ActiveEngine::start(module, &self.config) {
            Some(engine) => {
                info!(%module, "module started");
                self.engine = Some(engine);
                self.screen = Screen::InGame(module);
            }
            None => {
                warn!(%module, "module has no configured content");
                self.notices
                    .push(format!("{} has no content configured", module.title()));
                self.screen = Screen::Menu;
            }
        }
    }

    /// Forward player input to the active engine.
    pub fn handle_engine_input(&mut self, input: EngineInput) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let module = engine.module();
        match engine.handle_input(input) {
            Ok(EngineOutcome::InProgress) => {}
            Ok(EngineOutcome::Completed {
                score,
                time_spent_secs,
            }) => self.finish_run(module, score, time_spent_secs),
            Ok(EngineOutcome::Aborted) => self.abandon_run(),
            Err(e) => debug!(%module, error = %e, "engine rejected input"),
        }
    }

    /// Advance time. Returns advisories (hints, contextual help) for the
    /// TUI to overlay; they never change the screen.
    pub fn tick(&mut self, dt: std::time::Duration) -> Vec<Advisory> {
        let Some(engine) = self.engine.as_mut() else {
            return Vec::new();
        };
        let advisories = engine.tick(dt);

        // Time-limit endings surface here rather than through input.
        if let Some(outcome) = engine.finished() {
            let module = engine.module();
            match outcome {
                EngineOutcome::Completed {
                    score,
                    time_spent_secs,
                } => self.finish_run(module, score, time_spent_secs),
                EngineOutcome::Aborted => self.abandon_run(),
                EngineOutcome::InProgress => {}
            }
        }
        advisories
    }

    fn abandon_run(&mut self) {
        self.engine = None;
        self.screen = Screen::Menu;
    }

    fn finish_run(&mut self, module: ModuleId, score: u32, time_spent_secs: f64) {
        self.engine = None;
        let gems_earned = score / self.config.points_per_correct;

        let improved_best = match self.store.record_completion(
            &self.student_id,
            module,
            score,
            gems_earned,
            time_spent_secs,
        ) {
            Ok(ack) => {
                self.gems = ack.total_gems;
                ack.improved_best
            }
            Err(e) => {
                // Play continues on the in-memory totals; only durability
                // is lost.
                warn!(%module, error = %e, "completion could not be saved");
                self.notices
                    .push("Progress could not be saved this time".to_string());
                self.gems += gems_earned;
                false
            }
        };

        let before = std::mem::replace(
            &mut self.accessible,
            accessible_modules(self.gems, &self.config.thresholds),
        );
        let new_unlocks: Vec<ModuleId> = self
            .accessible
            .difference(&before)
            .copied()
            .collect();
        for unlocked in &new_unlocks {
            info!(module = %unlocked, "module unlocked");
        }

        info!(%module, score, gems_earned, total = self.gems, "module completed");
        self.screen = Screen::ModuleComplete {
            module,
            score,
            gems_earned,
            improved_best,
            new_unlocks,
        };
    }

    /// Leave a completion or locked screen for the hub.
    pub fn return_to_menu(&mut self) {
        self.engine = None;
        self.screen = Screen::Menu;
    }

    /// Attempt to open the teacher dashboard.
    pub fn teacher_login(&mut self, password: &str) {
        if !self.gate.verify(password) {
            warn!("teacher dashboard login rejected");
            self.notices.push("Incorrect teacher password".to_string());
            return;
        }
        match self.store.aggregate_report() {
            Ok(report) => {
                info!("teacher dashboard opened");
                self.screen = Screen::TeacherDashboard(report);
            }
            Err(e) => {
                warn!(error = %e, "could not build the progress report");
                self.notices
                    .push("The progress report is unavailable right now".to_string());
            }
        }
    }

    /// Append the session log entry. Called once, on the way out.
    pub fn end_session(&mut self) {
        let now = Utc::now();
        if let Err(e) = self
            .store
            .append_session(&self.student_id, self.session_start, now)
        {
            warn!(error = %e, "session log entry could not be saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Ack, MemoryStore};

    fn controller() -> Controller {
        Controller::new(GameConfig::default(), Box::new(MemoryStore::new()))
    }

    fn complete_phonics(controller: &mut Controller) {
        controller.select_module(ModuleId::PhonicsForest);
        let rounds = controller.config().phonics_round_limit;
        for _ in 0..rounds {
            let target = match controller.engine().unwrap() {
                ActiveEngine::Phonics(e) => e.target().to_string(),
                _ => panic!("expected the phonics engine"),
            };
            controller.handle_engine_input(EngineInput::Catch { symbol: target });
        }
    }

    #[test]
    fn locked_module_is_denied_without_a_store_write() {
        let mut controller = controller();
        controller.select_module(ModuleId::WordReef);

        assert!(matches!(
            controller.screen(),
            Screen::Locked {
                module: ModuleId::WordReef,
                needed: 40
            }
        ));
        assert!(controller.engine().is_none());
        // Denials leave no trace in the store.
        let report = controller.store.aggregate_report().unwrap();
        assert!(report.students.is_empty());
        assert!(!controller.take_notices().is_empty());
    }

    #[test]
    fn perfect_phonics_run_awards_gems_and_unlocks() {
        let mut controller = controller();
        complete_phonics(&mut controller);

        // 8 rounds at 10 points each is 80 points, worth 8 gems.
        match controller.screen() {
            Screen::ModuleComplete {
                module,
                score,
                gems_earned,
                ..
            } => {
                assert_eq!(*module, ModuleId::PhonicsForest);
                assert_eq!(*score, 80);
                assert_eq!(*gems_earned, 8);
            }
            other => panic!("expected the completion screen, got {other:?}"),
        }
        assert_eq!(controller.gems(), 8);
        // 8 gems is short of the 10-gem threshold.
        assert!(!controller.accessible().contains(&ModuleId::SentenceSummit));

        // A second perfect run crosses it.
        controller.return_to_menu();
        complete_phonics(&mut controller);
        match controller.screen() {
            Screen::ModuleComplete { new_unlocks, .. } => {
                assert_eq!(new_unlocks, &[ModuleId::SentenceSummit]);
            }
            other => panic!("expected the completion screen, got {other:?}"),
        }
        assert_eq!(controller.gems(), 16);
    }

    #[test]
    fn abort_returns_to_menu_without_recording() {
        let mut controller = controller();
        controller.select_module(ModuleId::PhonicsForest);
        controller.handle_engine_input(EngineInput::Abort);

        assert!(matches!(controller.screen(), Screen::Menu));
        let report = controller.store.aggregate_report().unwrap();
        assert!(report.students.is_empty());
    }

    #[test]
    fn wrong_teacher_password_stays_on_the_menu() {
        let mut controller = controller();
        controller.teacher_login("letmein");
        assert!(matches!(controller.screen(), Screen::Menu));
        assert!(!controller.take_notices().is_empty());
    }

    #[test]
    fn correct_teacher_password_opens_the_report() {
        let mut controller = controller();
        complete_phonics(&mut controller);
        controller.return_to_menu();

        controller.teacher_login("konekta2026");
        match controller.screen() {
            Screen::TeacherDashboard(report) => {
                assert_eq!(report.students.len(), 1);
                assert_eq!(report.students[0].total_gems, 8);
            }
            other => panic!("expected the dashboard, got {other:?}"),
        }
    }

    struct BrokenStore;

    impl ProgressStore for BrokenStore {
        fn record_completion(
            &mut self,
            _: &str,
            _: ModuleId,
            _: u32,
            _: u32,
            _: f64,
        ) -> Result<Ack, StoreError> {
            Err(StoreError::IoFailure("disk on fire".into()))
        }
        fn get_profile(&self, id: &str) -> Result<StudentProfile, StoreError> {
            Err(StoreError::NotFound(id.to_string()))
        }
        fn append_session(
            &mut self,
            _: &str,
            _: DateTime<Utc>,
            _: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            Err(StoreError::IoFailure("disk on fire".into()))
        }
        fn aggregate_report(&self) -> Result<ReportSummary, StoreError> {
            Err(StoreError::IoFailure("disk on fire".into()))
        }
    }

    #[test]
    fn storage_failure_keeps_the_session_alive() {
        let mut controller =
            Controller::new(GameConfig::default(), Box::new(BrokenStore));
        complete_phonics(&mut controller);

        // Unsaved, but the session still advances on in-memory totals.
        assert_eq!(controller.gems(), 8);
        assert!(matches!(
            controller.screen(),
            Screen::ModuleComplete { .. }
        ));
        assert!(controller
            .take_notices()
            .iter()
            .any(|n| n.contains("could not be saved")));

        // Ending the session must not panic either.
        controller.end_session();
    }

    #[test]
    fn time_limited_ending_lands_on_the_completion_screen() {
        let mut controller = controller();
        controller.select_module(ModuleId::PhonicsForest);
        let limit = controller.config().phonics_time_limit();
        controller.tick(limit + std::time::Duration::from_secs(1));

        assert!(matches!(
            controller.screen(),
            Screen::ModuleComplete { score: 0, .. }
        ));
    }
}
