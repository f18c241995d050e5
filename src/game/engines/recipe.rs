//! Kusina Cove: the recipe reading game
//!
//! Each recipe is shown in full first; the player reads the ingredients and
//! directions, then answers comprehension questions about them. Right or
//! wrong, the questions always move forward, and the next recipe starts
//! with its own reading page.

use super::{Advisory, AttentionTimers, EngineError, EngineInput, EngineOutcome, MiniGame};
use crate::data::{GameConfig, ModuleId, Recipe, RecipeQuestion};
use std::time::Duration;

pub struct RecipeEngine {
    recipes: Vec<Recipe>,
    recipe_ix: usize,
    question_ix: usize,
    /// The recipe page is up; questions start once the player moves on.
    reading: bool,
    points_per_correct: u32,

    score: u32,

    elapsed: Duration,
    timers: AttentionTimers,
    outcome: Option<EngineOutcome>,
}

impl RecipeEngine {
    /// None when the recipe table is empty.
    pub fn start(config: &GameConfig) -> Option<Self> {
        if config.content.recipes.is_empty() {
            return None;
        }
        Some(Self {
            recipes: config.content.recipes.clone(),
            recipe_ix: 0,
            question_ix: 0,
            reading: true,
            points_per_correct: config.points_per_correct,
            score: 0,
            elapsed: Duration::ZERO,
            timers: AttentionTimers::new(config),
            outcome: None,
        })
    }

    pub fn current_recipe(&self) -> &Recipe {
        &self.recipes[self.recipe_ix]
    }

    pub fn current_question(&self) -> &RecipeQuestion {
        &self.current_recipe().questions[self.question_ix]
    }

    pub fn is_reading(&self) -> bool {
        self.reading
    }

    pub fn recipe_number(&self) -> usize {
        self.recipe_ix + 1
    }

    pub fn recipe_total(&self) -> usize {
        self.recipes.len()
    }

    pub fn question_number(&self) -> usize {
        self.question_ix + 1
    }

    pub fn question_total(&self) -> usize {
        self.current_recipe().questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn finished(&self) -> Option<EngineOutcome> {
        self.outcome.clone()
    }

    fn choose(&mut self, index: usize) {
        if self.reading {
            return; // the recipe has to be read first
        }
        let question = self.current_question();
        if index >= question.choices.len() {
            return; // out-of-range pick is a no-op
        }
        if index == question.answer {
            self.score += self.points_per_correct;
        }

        self.question_ix += 1;
        if self.question_ix >= self.current_recipe().questions.len() {
            self.recipe_ix += 1;
            if self.recipe_ix >= self.recipes.len() {
                self.outcome = Some(EngineOutcome::Completed {
                    score: self.score,
                    time_spent_secs: self.elapsed.as_secs_f64(),
                });
            } else {
                self.question_ix = 0;
                self.reading = true;
            }
        }
    }
}

impl MiniGame for RecipeEngine {
    fn module(&self) -> ModuleId {
        ModuleId::KusinaCove
    }

    fn handle_input(&mut self, input: EngineInput) -> Result<EngineOutcome, EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::InvalidState);
        }
        match input {
            EngineInput::Proceed => {
                self.timers.touch();
                self.reading = false;
                Ok(EngineOutcome::InProgress)
            }
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
            let hint = if self.reading {
                "Read the ingredients first, then the directions in order"
            } else {
                "The answer is somewhere in the recipe you just read"
            };
            advisories.push(Advisory::Hint(hint.to_string()));
        }
        if signal.hover_help {
            advisories.push(Advisory::ContextHelp(
                "Recipes list what you need, then what to do, step by step".to_string(),
            ));
        }
        advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RecipeEngine {
        RecipeEngine::start(&GameConfig::default()).unwrap()
    }

    fn answer_correct(engine: &mut RecipeEngine) -> EngineOutcome {
        let answer = engine.current_question().answer;
        engine.handle_input(EngineInput::Choose(answer)).unwrap()
    }

    #[test]
    fn questions_wait_until_the_recipe_is_read() {
        let mut engine = engine();
        assert!(engine.is_reading());

        // Picking an answer on the recipe page changes nothing.
        engine.handle_input(EngineInput::Choose(0)).unwrap();
        assert!(engine.is_reading());
        assert_eq!(engine.question_number(), 1);
        assert_eq!(engine.score(), 0);

        engine.handle_input(EngineInput::Proceed).unwrap();
        assert!(!engine.is_reading());
    }

    #[test]
    fn perfect_run_scores_every_question_across_recipes() {
        let config = GameConfig::default();
        let total_questions: usize = config
            .content
            .recipes
            .iter()
            .map(|r| r.questions.len())
            .sum();
        let mut engine = engine();

        let mut outcome = EngineOutcome::InProgress;
        while engine.finished().is_none() {
            if engine.is_reading() {
                engine.handle_input(EngineInput::Proceed).unwrap();
            } else {
                outcome = answer_correct(&mut engine);
            }
        }
        match outcome {
            EngineOutcome::Completed { score, .. } => {
                assert_eq!(score, config.points_per_correct * total_questions as u32);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn wrong_answer_advances_without_scoring() {
        let mut engine = engine();
        engine.handle_input(EngineInput::Proceed).unwrap();

        let wrong = (engine.current_question().answer + 1) % engine.current_question().choices.len();
        engine.handle_input(EngineInput::Choose(wrong)).unwrap();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.question_number(), 2);
    }

    #[test]
    fn finishing_a_recipe_opens_the_next_reading_page() {
        let mut engine = engine();
        engine.handle_input(EngineInput::Proceed).unwrap();

        for _ in 0..engine.question_total() {
            answer_correct(&mut engine);
        }
        assert_eq!(engine.recipe_number(), 2);
        assert!(engine.is_reading());
    }

    #[test]
    fn out_of_range_choice_keeps_the_question() {
        let mut engine = engine();
        engine.handle_input(EngineInput::Proceed).unwrap();
        engine.handle_input(EngineInput::Choose(99)).unwrap();
        assert_eq!(engine.question_number(), 1);
        assert_eq!(engine.score(), 0);
    }
}
