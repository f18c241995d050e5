//! Mini-game engines
//!
//! Each game family is a bounded interactive loop behind the same capability
//! set: start, handle input, tick. The controller holds one engine at a time
//! as a tagged variant and never looks inside.

pub mod decision;
pub mod dialogue;
pub mod phonics;
pub mod recipe;
pub mod sentence;
pub mod wordmatch;

pub use decision::DecisionEngine;
pub use dialogue::DialogueEngine;
pub use phonics::PhonicsEngine;
pub use recipe::RecipeEngine;
pub use sentence::SentenceEngine;
pub use wordmatch::WordMatchEngine;

use crate::data::{GameConfig, ModuleId};
use std::time::Duration;

/// Player input forwarded into the active engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineInput {
    /// Catch the symbol currently under the basket (phonics).
    Catch { symbol: String },
    /// Put token `token` into slot `slot` (sentence assembly).
    PlaceToken { slot: usize, token: usize },
    /// Take whatever is in `slot` back out (sentence assembly).
    ClearSlot { slot: usize },
    /// Attempt to unlock a locked token by typing it (sentence assembly).
    TypeUnlock { token: usize, typed: String },
    /// Pick choice `n` (dialogue, decision, word match, recipe quiz).
    Choose(usize),
    /// Move on from a reading page to its questions (recipe).
    Proceed,
    /// The pointer is dwelling on an element, or left it.
    Hover(bool),
    /// Leave the game without recording progress.
    Abort,
}

/// Terminal or non-terminal result of feeding input to an engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    InProgress,
    Completed { score: u32, time_spent_secs: f64 },
    Aborted,
}

/// Advisory side-channel output from `tick`. Never a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    Hint(String),
    ContextHelp(String),
}

/// Engine misuse, e.g. input delivered after completion.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("input delivered to a finished engine")]
    InvalidState,
}

/// The uniform capability set every game family implements.
pub trait MiniGame {
    fn module(&self) -> ModuleId;
    fn handle_input(&mut self, input: EngineInput) -> Result<EngineOutcome, EngineError>;
    fn tick(&mut self, dt: Duration) -> Vec<Advisory>;
}

/// Cooperative inactivity and hover timers shared by every engine.
///
/// Checked once per tick against accumulated wall-clock deltas; each fires
/// at most once per idle or hover stretch.
#[derive(Debug)]
pub struct AttentionTimers {
    hint_delay: Duration,
    hover_delay: Duration,
    idle: Duration,
    hovering: Duration,
    hover_active: bool,
    idle_fired: bool,
    hover_fired: bool,
}

/// What the timers noticed this tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttentionSignal {
    pub idle_hint: bool,
    pub hover_help: bool,
}

impl AttentionTimers {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            hint_delay: config.hint_delay(),
            hover_delay: config.hover_hint_delay(),
            idle: Duration::ZERO,
            hovering: Duration::ZERO,
            hover_active: false,
            idle_fired: false,
            hover_fired: false,
        }
    }

    /// Any real input resets the idle stretch.
    pub fn touch(&mut self) {
        self.idle = Duration::ZERO;
        self.idle_fired = false;
    }

    pub fn set_hover(&mut self, hovering: bool) {
        if self.hover_active != hovering {
            self.hovering = Duration::ZERO;
            self.hover_fired = false;
        }
        self.hover_active = hovering;
    }

    pub fn tick(&mut self, dt: Duration) -> AttentionSignal {
        let mut signal = AttentionSignal::default();

        self.idle += dt;
        if !self.idle_fired && self.idle >= self.hint_delay {
            self.idle_fired = true;
            signal.idle_hint = true;
        }

        if self.hover_active {
            self.hovering += dt;
            if !self.hover_fired && self.hovering >= self.hover_delay {
                self.hover_fired = true;
                signal.hover_help = true;
            }
        }
        signal
    }
}

/// The active engine, one variant per game family.
pub enum ActiveEngine {
    Phonics(PhonicsEngine),
    Sentence(SentenceEngine),
    Dialogue(DialogueEngine),
    Decision(DecisionEngine),
    WordMatch(WordMatchEngine),
    Recipe(RecipeEngine),
}

impl ActiveEngine {
    /// Start the engine for a module from the configured content tables.
    ///
    /// Returns `None` when the content table for the module is empty, which
    /// the controller surfaces as a notice rather than a crash.
    pub fn start(module: ModuleId, config: &GameConfig) -> Option<ActiveEngine> {
        match module {
            ModuleId::PhonicsForest => PhonicsEngine::start(config).map(ActiveEngine::Phonics),
            ModuleId::SentenceSummit => {
                SentenceEngine::start(config).map(ActiveEngine::Sentence)
            }
            ModuleId::StorySea => DialogueEngine::start(config).map(ActiveEngine::Dialogue),
            ModuleId::BarangayPlaza => DecisionEngine::start(config).map(ActiveEngine::Decision),
            ModuleId::WordReef => WordMatchEngine::start(config).map(ActiveEngine::WordMatch),
            ModuleId::KusinaCove => RecipeEngine::start(config).map(ActiveEngine::Recipe),
        }
    }

    pub fn module(&self) -> ModuleId {
        match self {
            ActiveEngine::Phonics(e) => e.module(),
            ActiveEngine::Sentence(e) => e.module(),
            ActiveEngine::Dialogue(e) => e.module(),
            ActiveEngine::Decision(e) => e.module(),
            ActiveEngine::WordMatch(e) => e.module(),
            ActiveEngine::Recipe(e) => e.module(),
        }
    }

    pub fn handle_input(&mut self, input: EngineInput) -> Result<EngineOutcome, EngineError> {
        match self {
            ActiveEngine::Phonics(e) => e.handle_input(input),
            ActiveEngine::Sentence(e) => e.handle_input(input),
            ActiveEngine::Dialogue(e) => e.handle_input(input),
            ActiveEngine::Decision(e) => e.handle_input(input),
            ActiveEngine::WordMatch(e) => e.handle_input(input),
            ActiveEngine::Recipe(e) => e.handle_input(input),
        }
    }

    pub fn tick(&mut self, dt: Duration) -> Vec<Advisory> {
        match self {
            ActiveEngine::Phonics(e) => e.tick(dt),
            ActiveEngine::Sentence(e) => e.tick(dt),
            ActiveEngine::Dialogue(e) => e.tick(dt),
            ActiveEngine::Decision(e) => e.tick(dt),
            ActiveEngine::WordMatch(e) => e.tick(dt),
            ActiveEngine::Recipe(e) => e.tick(dt),
        }
    }

    /// Time-limit style completions surface through tick; the controller
    /// polls this after ticking.
    pub fn finished(&self) -> Option<EngineOutcome> {
        match self {
            ActiveEngine::Phonics(e) => e.finished(),
            ActiveEngine::Sentence(e) => e.finished(),
            ActiveEngine::Dialogue(e) => e.finished(),
            ActiveEngine::Decision(e) => e.finished(),
            ActiveEngine::WordMatch(e) => e.finished(),
            ActiveEngine::Recipe(e) => e.finished(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_hint_fires_once_per_stretch() {
        let config = GameConfig::default();
        let mut timers = AttentionTimers::new(&config);

        assert!(!timers.tick(Duration::from_secs(4)).idle_hint);
        assert!(timers.tick(Duration::from_secs(2)).idle_hint);
        // Already fired; stays quiet until touched.
        assert!(!timers.tick(Duration::from_secs(10)).idle_hint);

        timers.touch();
        assert!(timers.tick(Duration::from_secs(6)).idle_hint);
    }

    #[test]
    fn hover_help_needs_continuous_dwell() {
        let config = GameConfig::default();
        let mut timers = AttentionTimers::new(&config);

        timers.set_hover(true);
        assert!(!timers.tick(Duration::from_secs(2)).hover_help);
        // Leaving resets the dwell.
        timers.set_hover(false);
        timers.set_hover(true);
        assert!(!timers.tick(Duration::from_secs(2)).hover_help);
        assert!(timers.tick(Duration::from_secs(2)).hover_help);
    }
}
