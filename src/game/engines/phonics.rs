//! Phonics Forest: the falling-letter catch game
//!
//! Symbols rain down; the player catches the one matching the target sound.
//! Speed scales with the round number. The run ends after a fixed number of
//! rounds or a wall-clock limit, whichever comes first.

use super::{Advisory, AttentionTimers, EngineError, EngineInput, EngineOutcome, MiniGame};
use crate::data::{GameConfig, ModuleId, PhonicsRound};
use std::time::Duration;

/// A symbol on its way down, in normalized screen space (0.0 top, 1.0 ground).
#[derive(Debug, Clone)]
pub struct FallingSymbol {
    pub symbol: String,
    pub y: f32,
    pub lane: usize,
}

pub struct PhonicsEngine {
    rounds: Vec<PhonicsRound>,
    round_ix: usize,
    round_limit: usize,
    time_limit: Duration,
    points_per_correct: u32,

    falling: Vec<FallingSymbol>,
    base_speed: f32,

    score: u32,
    elapsed: Duration,
    timers: AttentionTimers,
    outcome: Option<EngineOutcome>,
}

// Fraction of the screen a symbol falls per second in round one.
const BASE_FALL_SPEED: f32 = 0.15;
// Each round adds this much speed.
const SPEED_RAMP: f32 = 0.03;

impl PhonicsEngine {
    /// None when the phonics table is empty.
    pub fn start(config: &GameConfig) -> Option<Self> {
        if config.content.phonics.is_empty() {
            return None;
        }
        let mut engine = Self {
            rounds: config.content.phonics.clone(),
            round_ix: 0,
            round_limit: config.phonics_round_limit,
            time_limit: config.phonics_time_limit(),
            points_per_correct: config.points_per_correct,
            falling: Vec::new(),
            base_speed: BASE_FALL_SPEED,
            score: 0,
            elapsed: Duration::ZERO,
            timers: AttentionTimers::new(config),
            outcome: None,
        };
        engine.spawn_round();
        Some(engine)
    }

    pub fn target(&self) -> &str {
        self.rounds[self.round_ix % self.rounds.len()].target.as_str()
    }

    pub fn falling(&self) -> &[FallingSymbol] {
        &self.falling
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> usize {
        self.round_ix + 1
    }

    pub fn round_limit(&self) -> usize {
        self.round_limit
    }

    pub fn finished(&self) -> Option<EngineOutcome> {
        self.outcome.clone()
    }

    fn spawn_round(&mut self) {
        let round = &self.rounds[self.round_ix % self.rounds.len()];
        self.falling = round
            .symbols
            .iter()
            .enumerate()
            .map(|(lane, symbol)| FallingSymbol {
                symbol: symbol.clone(),
                // Stagger starts so the column is not a solid wall.
                y: -0.2 * lane as f32,
                lane,
            })
            .collect();
    }

    fn fall_speed(&self) -> f32 {
        self.base_speed + SPEED_RAMP * self.round_ix as f32
    }

    fn advance_round(&mut self) {
        self.round_ix += 1;
        if self.round_ix >= self.round_limit {
            self.complete();
        } else {
            self.spawn_round();
        }
    }

    fn complete(&mut self) {
        self.outcome = Some(EngineOutcome::Completed {
            score: self.score,
            time_spent_secs: self.elapsed.as_secs_f64(),
        });
    }
}

impl MiniGame for PhonicsEngine {
    fn module(&self) -> ModuleId {
        ModuleId::PhonicsForest
    }

    fn handle_input(&mut self, input: EngineInput) -> Result<EngineOutcome, EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::InvalidState);
        }
        match input {
            EngineInput::Catch { symbol } => {
                self.timers.touch();
                if symbol == self.target() {
                    self.score += self.points_per_correct;
                    self.advance_round();
                }
                Ok(self.outcome.clone().unwrap_or(EngineOutcome::InProgress))
            }
            EngineInput::Hover(hovering) => {
                self.timers.set_hover(hovering);
                Ok(EngineOutcome::InProgress)
            }
            EngineInput::Abort => {
                self.outcome = Some(EngineOutcome::Aborted);
                Ok(EngineOutcome::Aborted)
            }
            // Inputs for other game families are a no-op here.
            _ => Ok(EngineOutcome::InProgress),
        }
    }

    fn tick(&mut self, dt: Duration) -> Vec<Advisory> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        self.elapsed += dt;

        let speed = self.fall_speed();
        for symbol in &mut self.falling {
            symbol.y += speed * dt.as_secs_f32();
            if symbol.y > 1.0 {
                symbol.y = 0.0; // re-enters at the top
            }
        }

        if self.elapsed >= self.time_limit {
            self.complete();
            return Vec::new();
        }

        let signal = self.timers.tick(dt);
        let mut advisories = Vec::new();
        if signal.idle_hint {
            advisories.push(Advisory::Hint(format!(
                "Catch the letter that says '{}'",
                self.target()
            )));
        }
        if signal.hover_help {
            advisories.push(Advisory::ContextHelp(
                "Move under a letter and press space to catch it".to_string(),
            ));
        }
        advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catch(engine: &mut PhonicsEngine, symbol: &str) -> EngineOutcome {
        engine
            .handle_input(EngineInput::Catch {
                symbol: symbol.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn correct_catches_complete_after_round_limit() {
        let config = GameConfig::default();
        let mut engine = PhonicsEngine::start(&config).unwrap();

        for _ in 0..config.phonics_round_limit - 1 {
            let target = engine.target().to_string();
            assert_eq!(catch(&mut engine, &target), EngineOutcome::InProgress);
        }
        let target = engine.target().to_string();
        match catch(&mut engine, &target) {
            EngineOutcome::Completed { score, .. } => {
                assert_eq!(
                    score,
                    config.points_per_correct * config.phonics_round_limit as u32
                );
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn empty_phonics_table_refuses_to_start() {
        let mut config = GameConfig::default();
        config.content.phonics.clear();
        assert!(PhonicsEngine::start(&config).is_none());
    }

    #[test]
    fn wrong_catch_scores_nothing_and_keeps_round() {
        let config = GameConfig::default();
        let mut engine = PhonicsEngine::start(&config).unwrap();
        let round = engine.round();
        assert_eq!(catch(&mut engine, "?"), EngineOutcome::InProgress);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.round(), round);
    }

    #[test]
    fn time_limit_ends_the_run() {
        let config = GameConfig::default();
        let mut engine = PhonicsEngine::start(&config).unwrap();
        engine.tick(Duration::from_secs(config.phonics_time_limit_secs + 1));
        assert!(matches!(
            engine.finished(),
            Some(EngineOutcome::Completed { score: 0, .. })
        ));
    }

    #[test]
    fn speed_scales_with_difficulty() {
        let config = GameConfig::default();
        let mut engine = PhonicsEngine::start(&config).unwrap();
        let first = engine.fall_speed();
        let target = engine.target().to_string();
        catch(&mut engine, &target);
        assert!(engine.fall_speed() > first);
    }

    #[test]
    fn input_after_completion_is_invalid_state() {
        let config = GameConfig::default();
        let mut engine = PhonicsEngine::start(&config).unwrap();
        engine.tick(Duration::from_secs(config.phonics_time_limit_secs + 1));
        assert!(catch_err(&mut engine));
    }

    fn catch_err(engine: &mut PhonicsEngine) -> bool {
        engine
            .handle_input(EngineInput::Catch {
                symbol: "B".to_string(),
            })
            .is_err()
    }
}
