//! Story Sea: the branching dialogue engine
//!
//! The pointer starts at the story root. Correct choices follow their target
//! edge; wrong answers detour to the node's remediation and loop back, up to
//! a configured retry budget, after which the engine auto-advances and owes
//! the player a hint. Terminal nodes complete the run with an aggregate
//! correctness score.

use super::{Advisory, AttentionTimers, EngineError, EngineInput, EngineOutcome, MiniGame};
use crate::data::{ChoiceTarget, DialogueNode, DialogueStory, GameConfig, ModuleId};
use std::collections::HashMap;
use std::time::Duration;

pub struct DialogueEngine {
    story: DialogueStory,
    current: String,
    retries: HashMap<String, u32>,
    retry_limit: u32,
    points_per_correct: u32,

    score: u32,
    steps: u32,
    /// Hint owed after an auto-advance, delivered on the next tick.
    pending_hint: Option<String>,

    elapsed: Duration,
    timers: AttentionTimers,
    outcome: Option<EngineOutcome>,
}

impl DialogueEngine {
    /// None when the story table is empty.
    pub fn start(config: &GameConfig) -> Option<Self> {
        let story = config.content.stories.first()?.clone();
        let current = story.root.clone();
        Some(Self {
            story,
            current,
            retries: HashMap::new(),
            retry_limit: config.dialogue_retry_limit,
            points_per_correct: config.points_per_correct,
            score: 0,
            steps: 0,
            pending_hint: None,
            elapsed: Duration::ZERO,
            timers: AttentionTimers::new(config),
            outcome: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.story.title
    }

    pub fn current_node(&self) -> &DialogueNode {
        // Validation guarantees every reachable id resolves.
        &self.story.nodes[&self.current]
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn finished(&self) -> Option<EngineOutcome> {
        self.outcome.clone()
    }

    fn follow(&mut self, target: ChoiceTarget) {
        match target {
            ChoiceTarget::Terminal => {
                self.outcome = Some(EngineOutcome::Completed {
                    score: self.score,
                    time_spent_secs: self.elapsed.as_secs_f64(),
                });
            }
            ChoiceTarget::Node(next) => self.current = next,
        }
    }

    fn choose(&mut self, index: usize) {
        let node = self.current_node().clone();
        let Some(choice) = node.choices.get(index) else {
            return; // out-of-range pick is a no-op
        };
        self.steps += 1;

        if choice.correct {
            // Only questions score; remediation and linear nodes are free.
            if node.is_question() {
                self.score += self.points_per_correct;
            }
            self.follow(choice.target.clone());
            return;
        }

        let attempts = self.retries.entry(node.id.clone()).or_insert(0);
        *attempts += 1;

        if *attempts <= self.retry_limit {
            // Detour to the remediation node; its return edge points back
            // at this question. A story without one retries in place.
            if let Some(rem) = &node.remediation {
                self.current = rem.clone();
            }
        } else {
            // Retry budget exhausted: advance along the correct edge with a
            // hint, but no points.
            self.pending_hint = Some(
                node.hint
                    .clone()
                    .unwrap_or_else(|| "Let's move on together".to_string()),
            );
            if let Some(correct) = node.first_correct() {
                self.follow(correct.target.clone());
            }
        }
    }
}

impl MiniGame for DialogueEngine {
    fn module(&self) -> ModuleId {
        ModuleId::StorySea
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

        let mut advisories = Vec::new();
        if let Some(hint) = self.pending_hint.take() {
            advisories.push(Advisory::Hint(hint));
        }

        let signal = self.timers.tick(dt);
        if signal.idle_hint {
            let hint = self
                .current_node()
                .hint
                .clone()
                .unwrap_or_else(|| "Read the story part again, slowly".to_string());
            advisories.push(Advisory::Hint(hint));
        }
        if signal.hover_help {
            advisories.push(Advisory::ContextHelp(
                "Pick the answer that fits what the story said".to_string(),
            ));
        }
        advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::content::create_fisherman_story;

    fn engine() -> DialogueEngine {
        DialogueEngine::start(&GameConfig::default()).unwrap()
    }

    fn pick_correct(engine: &mut DialogueEngine) -> EngineOutcome {
        let index = engine
            .current_node()
            .choices
            .iter()
            .position(|c| c.correct)
            .unwrap();
        engine.handle_input(EngineInput::Choose(index)).unwrap()
    }

    fn pick_wrong(engine: &mut DialogueEngine) {
        let index = engine
            .current_node()
            .choices
            .iter()
            .position(|c| !c.correct)
            .unwrap();
        engine.handle_input(EngineInput::Choose(index)).unwrap();
    }

    #[test]
    fn all_correct_run_takes_shortest_path_at_full_score() {
        let story = create_fisherman_story();
        let (path_len, questions) = story.correct_path_profile();
        let config = GameConfig::default();
        let mut engine = engine();

        let mut outcome = EngineOutcome::InProgress;
        for _ in 0..path_len {
            outcome = pick_correct(&mut engine);
        }
        match outcome {
            EngineOutcome::Completed { score, .. } => {
                assert_eq!(score, questions * config.points_per_correct);
                assert_eq!(engine.steps(), path_len as u32);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn wrong_answer_detours_through_remediation() {
        let mut engine = engine();
        let question = engine.current_node().id.clone();
        let remediation = engine.current_node().remediation.clone().unwrap();

        pick_wrong(&mut engine);
        assert_eq!(engine.current_node().id, remediation);

        // The remediation's only edge loops back to the question.
        pick_correct(&mut engine);
        assert_eq!(engine.current_node().id, question);
    }

    #[test]
    fn retry_budget_auto_advances_with_hint_and_no_points() {
        let config = GameConfig::default();
        let mut engine = engine();
        let question = engine.current_node().id.clone();

        for _ in 0..config.dialogue_retry_limit {
            pick_wrong(&mut engine); // to remediation
            pick_correct(&mut engine); // back to the question
            assert_eq!(engine.current_node().id, question);
        }
        // One more wrong answer blows the budget.
        pick_wrong(&mut engine);
        assert_ne!(engine.current_node().id, question);
        assert_eq!(engine.score(), 0);

        let advisories = engine.tick(Duration::from_millis(16));
        assert!(advisories
            .iter()
            .any(|a| matches!(a, Advisory::Hint(_))));
    }

    #[test]
    fn out_of_range_choice_is_a_no_op() {
        let mut engine = engine();
        let node = engine.current_node().id.clone();
        engine.handle_input(EngineInput::Choose(99)).unwrap();
        assert_eq!(engine.current_node().id, node);
        assert_eq!(engine.steps(), 0);
    }
}
