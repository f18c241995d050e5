//! Word Reef: the synonym and antonym quiz
//!
//! A fixed sequence of prompts. Each asks for a synonym or antonym of a
//! word; a pick is correct when it belongs to the configured accepted set.
//! Right or wrong, the quiz always moves to the next prompt.

use super::{Advisory, AttentionTimers, EngineError, EngineInput, EngineOutcome, MiniGame};
use crate::data::{GameConfig, ModuleId, WordMatchPrompt};
use std::time::Duration;

pub struct WordMatchEngine {
    prompts: Vec<WordMatchPrompt>,
    prompt_ix: usize,
    points_per_correct: u32,

    score: u32,

    elapsed: Duration,
    timers: AttentionTimers,
    outcome: Option<EngineOutcome>,
}

impl WordMatchEngine {
    /// None when the word-match table is empty.
    pub fn start(config: &GameConfig) -> Option<Self> {
        if config.content.word_match.is_empty() {
            return None;
        }
        Some(Self {
            prompts: config.content.word_match.clone(),
            prompt_ix: 0,
            points_per_correct: config.points_per_correct,
            score: 0,
            elapsed: Duration::ZERO,
            timers: AttentionTimers::new(config),
            outcome: None,
        })
    }

    pub fn current_prompt(&self) -> &WordMatchPrompt {
        &self.prompts[self.prompt_ix]
    }

    pub fn prompt_number(&self) -> usize {
        self.prompt_ix + 1
    }

    pub fn prompt_total(&self) -> usize {
        self.prompts.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn finished(&self) -> Option<EngineOutcome> {
        self.outcome.clone()
    }

    fn choose(&mut self, index: usize) {
        let prompt = self.current_prompt();
        let Some(picked) = prompt.choices.get(index) else {
            return; // out-of-range pick is a no-op
        };
        if prompt.accepted.contains(picked) {
            self.score += self.points_per_correct;
        }

        self.prompt_ix += 1;
        if self.prompt_ix >= self.prompts.len() {
            self.outcome = Some(EngineOutcome::Completed {
                score: self.score,
                time_spent_secs: self.elapsed.as_secs_f64(),
            });
        }
    }
}

impl MiniGame for WordMatchEngine {
    fn module(&self) -> ModuleId {
        ModuleId::WordReef
    }

    fn handle_input(&mut self, input: EngineInput) -> Result<EngineOutcome, EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::InvalidState);
        }
        match input {
            EngineInput::Choose(index) => {
                self.timers.touch();
                self.choose(index);
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
            let prompt = self.current_prompt();
            advisories.push(Advisory::Hint(format!(
                "A {} means a word with the {} meaning",
                prompt.kind,
                match prompt.kind {
                    crate::data::MatchKind::Synonym => "same",
                    crate::data::MatchKind::Antonym => "opposite",
                }
            )));
        }
        if signal.hover_help {
            advisories.push(Advisory::ContextHelp(
                "Say the two words out loud and compare their meanings".to_string(),
            ));
        }
        advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> WordMatchEngine {
        WordMatchEngine::start(&GameConfig::default()).unwrap()
    }

    fn pick_correct(engine: &mut WordMatchEngine) -> EngineOutcome {
        let prompt = engine.current_prompt();
        let index = prompt
            .choices
            .iter()
            .position(|c| prompt.accepted.contains(c))
            .unwrap();
        engine.handle_input(EngineInput::Choose(index)).unwrap()
    }

    fn pick_wrong(engine: &mut WordMatchEngine) -> EngineOutcome {
        let prompt = engine.current_prompt();
        let index = prompt
            .choices
            .iter()
            .position(|c| !prompt.accepted.contains(c))
            .unwrap();
        engine.handle_input(EngineInput::Choose(index)).unwrap()
    }

    #[test]
    fn perfect_run_scores_every_prompt() {
        let config = GameConfig::default();
        let mut engine = engine();
        let total = engine.prompt_total();

        let mut outcome = EngineOutcome::InProgress;
        for _ in 0..total {
            outcome = pick_correct(&mut engine);
        }
        match outcome {
            EngineOutcome::Completed { score, .. } => {
                assert_eq!(score, config.points_per_correct * total as u32);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn wrong_pick_advances_without_scoring() {
        let mut engine = engine();
        assert_eq!(pick_wrong(&mut engine), EngineOutcome::InProgress);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.prompt_number(), 2);
    }

    #[test]
    fn any_accepted_member_scores() {
        // Prompts may accept several choices; each one counts.
        let mut engine = engine();
        let multi = engine
            .prompts
            .iter()
            .position(|p| p.accepted.len() > 1)
            .unwrap();
        while engine.prompt_ix < multi {
            pick_wrong(&mut engine);
        }
        let prompt = engine.current_prompt();
        let second = prompt
            .choices
            .iter()
            .position(|c| c == &prompt.accepted[1])
            .unwrap();
        let before = engine.score();
        engine.handle_input(EngineInput::Choose(second)).unwrap();
        assert_eq!(engine.score(), before + 10);
    }

    #[test]
    fn quiz_length_matches_configured_prompts() {
        let config = GameConfig::default();
        let engine = engine();
        assert_eq!(engine.prompt_total(), config.content.word_match.len());
    }
}
