//! Sentence Summit: the word-block assembly game
//!
//! A row of empty slots, a pool of word tokens. Locked tokens must be typed
//! correctly before they can be placed. The puzzle completes only when every
//! slot is filled and the sequence is one of the accepted orderings.

use super::{Advisory, AttentionTimers, EngineError, EngineInput, EngineOutcome, MiniGame};
use crate::data::{GameConfig, ModuleId, SentenceSet};
use std::time::Duration;

/// A token in the pool, with its runtime lock/placement state.
#[derive(Debug, Clone)]
pub struct TokenState {
    pub word: String,
    pub locked: bool,
    pub placed: bool,
}

pub struct SentenceEngine {
    set: SentenceSet,
    slots: Vec<Option<usize>>,
    tokens: Vec<TokenState>,
    points_per_correct: u32,
    wrong_fills: u32,
    elapsed: Duration,
    timers: AttentionTimers,
    outcome: Option<EngineOutcome>,
}

impl SentenceEngine {
    /// None when the sentence table is empty.
    pub fn start(config: &GameConfig) -> Option<Self> {
        let set = config.content.sentences.first()?.clone();
        let slots = vec![None; set.slot_count()];
        let tokens = set
            .tokens
            .iter()
            .map(|t| TokenState {
                word: t.word.clone(),
                locked: t.locked,
                placed: false,
            })
            .collect();
        Some(Self {
            set,
            slots,
            tokens,
            points_per_correct: config.points_per_correct,
            wrong_fills: 0,
            elapsed: Duration::ZERO,
            timers: AttentionTimers::new(config),
            outcome: None,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.set.prompt
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn tokens(&self) -> &[TokenState] {
        &self.tokens
    }

    pub fn finished(&self) -> Option<EngineOutcome> {
        self.outcome.clone()
    }

    fn current_sequence(&self) -> Option<Vec<String>> {
        self.slots
            .iter()
            .map(|slot| slot.map(|ix| self.tokens[ix].word.clone()))
            .collect()
    }

    /// Check the filled row against the accepted-orderings set.
    fn judge_filled(&mut self) {
        let Some(sequence) = self.current_sequence() else {
            return;
        };
        if self.set.accepted.contains(&sequence) {
            let score = self.points_per_correct * self.slots.len() as u32;
            self.outcome = Some(EngineOutcome::Completed {
                score,
                time_spent_secs: self.elapsed.as_secs_f64(),
            });
        } else {
            self.wrong_fills += 1;
        }
    }
}

impl MiniGame for SentenceEngine {
    fn module(&self) -> ModuleId {
        ModuleId::SentenceSummit
    }

    fn handle_input(&mut self, input: EngineInput) -> Result<EngineOutcome, EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::InvalidState);
        }
        match input {
            EngineInput::PlaceToken { slot, token } => {
                self.timers.touch();
                let placeable = slot < self.slots.len()
                    && token < self.tokens.len()
                    && self.slots[slot].is_none()
                    && !self.tokens[token].placed
                    && !self.tokens[token].locked;
                if placeable {
                    self.slots[slot] = Some(token);
                    self.tokens[token].placed = true;
                    if self.slots.iter().all(Option::is_some) {
                        self.judge_filled();
                    }
                }
                Ok(self.outcome.clone().unwrap_or(EngineOutcome::InProgress))
            }
            EngineInput::ClearSlot { slot } => {
                self.timers.touch();
                if let Some(token) = self.slots.get_mut(slot).and_then(Option::take) {
                    self.tokens[token].placed = false;
                }
                Ok(EngineOutcome::InProgress)
            }
            EngineInput::TypeUnlock { token, typed } => {
                self.timers.touch();
                if let Some(state) = self.tokens.get_mut(token) {
                    if state.locked && typed.trim().eq_ignore_ascii_case(&state.word) {
                        state.locked = false;
                    }
                }
                Ok(EngineOutcome::InProgress)
            }
            EngineInput::Hover(hovering) => {
                self.timers.set_hover(hovering);
                Ok(EngineOutcome::InProgress)
            }
            EngineInput::Abort => {
                self.outcome = Some(EngineOutcome::Aborted);
                Ok(EngineOutcome::Aborted)
            }
            _ => Ok(EngineOutcome::InProgress),
        }
    }

    fn tick(&mut self, dt: Duration) -> Vec<Advisory> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        self.elapsed += dt;

        let signal = self.timers.tick(dt);
        let mut advisories = Vec::new();
        if signal.idle_hint {
            let next_empty = self.slots.iter().position(Option::is_none);
            advisories.push(Advisory::Hint(match next_empty {
                Some(ix) => format!("Which word sounds right in position {}?", ix + 1),
                None => "Try a different order for the words".to_string(),
            }));
        }
        if signal.hover_help {
            advisories.push(Advisory::ContextHelp(
                "Locked blocks open when you type the word correctly".to_string(),
            ));
        }
        advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::content::{SentenceSet, WordToken};

    fn config_with(set: SentenceSet) -> GameConfig {
        let mut config = GameConfig::default();
        config.content.sentences = vec![set];
        config
    }

    fn two_order_set() -> SentenceSet {
        SentenceSet {
            id: "t".into(),
            prompt: "build it".into(),
            tokens: ["we", "eat", "rice"]
                .iter()
                .map(|w| WordToken {
                    word: w.to_string(),
                    locked: false,
                })
                .collect(),
            accepted: vec![
                vec!["we".into(), "eat".into(), "rice".into()],
                vec!["rice".into(), "we".into(), "eat".into()],
            ],
        }
    }

    fn place(engine: &mut SentenceEngine, slot: usize, token: usize) -> EngineOutcome {
        engine
            .handle_input(EngineInput::PlaceToken { slot, token })
            .unwrap()
    }

    #[test]
    fn completes_only_on_accepted_ordering() {
        let mut engine = SentenceEngine::start(&config_with(two_order_set())).unwrap();

        // eat, rice, we: filled but not accepted.
        place(&mut engine, 0, 1);
        place(&mut engine, 1, 2);
        assert_eq!(place(&mut engine, 2, 0), EngineOutcome::InProgress);
        assert!(engine.finished().is_none());

        // Rearrange into the second accepted ordering.
        engine.handle_input(EngineInput::ClearSlot { slot: 0 }).unwrap();
        engine.handle_input(EngineInput::ClearSlot { slot: 1 }).unwrap();
        engine.handle_input(EngineInput::ClearSlot { slot: 2 }).unwrap();
        place(&mut engine, 0, 2);
        place(&mut engine, 1, 0);
        match place(&mut engine, 2, 1) {
            EngineOutcome::Completed { score, .. } => assert_eq!(score, 30),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn any_accepted_ordering_satisfies_completion() {
        // The first accepted ordering works too.
        let mut engine = SentenceEngine::start(&config_with(two_order_set())).unwrap();
        place(&mut engine, 0, 0);
        place(&mut engine, 1, 1);
        assert!(matches!(
            place(&mut engine, 2, 2),
            EngineOutcome::Completed { .. }
        ));
    }

    #[test]
    fn locked_token_needs_typed_unlock() {
        let mut set = two_order_set();
        set.tokens[1].locked = true;
        let mut engine = SentenceEngine::start(&config_with(set)).unwrap();

        place(&mut engine, 1, 1);
        assert!(engine.slots()[1].is_none(), "locked token must not place");

        engine
            .handle_input(EngineInput::TypeUnlock {
                token: 1,
                typed: "ate".into(),
            })
            .unwrap();
        assert!(engine.tokens()[1].locked, "wrong typing keeps the lock");

        engine
            .handle_input(EngineInput::TypeUnlock {
                token: 1,
                typed: "EAT".into(),
            })
            .unwrap();
        assert!(!engine.tokens()[1].locked);
        place(&mut engine, 1, 1);
        assert_eq!(engine.slots()[1], Some(1));
    }

    #[test]
    fn slot_accepts_exactly_one_token() {
        let mut engine = SentenceEngine::start(&config_with(two_order_set())).unwrap();
        place(&mut engine, 0, 0);
        place(&mut engine, 0, 1);
        assert_eq!(engine.slots()[0], Some(0));
        assert!(!engine.tokens()[1].placed);
    }
}
