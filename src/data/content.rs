//! Content tables for the mini-games
//!
//! All gameplay text lives here as injected, validated data: dialogue
//! stories, sentence sets, word-match prompts, decision scripts, and phonics
//! rounds. The built-in tables carry the default Filipino literacy content;
//! deployments can replace them with a JSON file.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::config::ConfigError;

/// Where a dialogue choice leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceTarget {
    Node(String),
    Terminal,
}

/// A choice the player can make at a dialogue node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueChoice {
    pub text: String,
    pub correct: bool,
    pub target: ChoiceTarget,
}

/// A node in a branching story.
///
/// A node with any incorrect choice is a question; only questions award
/// points. Wrong answers route to the remediation node, which re-teaches and
/// loops back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<DialogueChoice>,
    /// Node shown after a wrong answer, before retrying this question.
    pub remediation: Option<String>,
    /// Shown when the retry budget runs out and the engine auto-advances.
    pub hint: Option<String>,
}

impl DialogueNode {
    /// Questions have at least one wrong choice to discriminate against.
    pub fn is_question(&self) -> bool {
        self.choices.iter().any(|c| !c.correct)
    }

    pub fn first_correct(&self) -> Option<&DialogueChoice> {
        self.choices.iter().find(|c| c.correct)
    }
}

/// A complete branching story for the Story Sea zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueStory {
    pub id: String,
    pub title: String,
    pub root: String,
    pub nodes: HashMap<String, DialogueNode>,
}

impl DialogueStory {
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    /// Number of steps and attainable points along the all-correct path.
    pub fn correct_path_profile(&self) -> (usize, u32) {
        let mut steps = 0;
        let mut questions = 0;
        let mut current = self.root.as_str();
        let mut seen = HashSet::new();
        while let Some(node) = self.nodes.get(current) {
            if !seen.insert(node.id.clone()) {
                break; // validation forbids this, stay safe anyway
            }
            steps += 1;
            if node.is_question() {
                questions += 1;
            }
            match node.first_correct().map(|c| &c.target) {
                Some(ChoiceTarget::Node(next)) => current = next,
                _ => break,
            }
        }
        (steps, questions)
    }
}

/// A word block for sentence assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordToken {
    pub word: String,
    /// Locked tokens must be typed correctly before they become placeable.
    #[serde(default)]
    pub locked: bool,
}

/// One sentence-assembly puzzle.
///
/// Completion is exact membership in `accepted`, a set of orderings; a
/// sentence may read correctly more than one way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceSet {
    pub id: String,
    pub prompt: String,
    pub tokens: Vec<WordToken>,
    pub accepted: Vec<Vec<String>>,
}

impl SentenceSet {
    pub fn slot_count(&self) -> usize {
        self.accepted.first().map(|a| a.len()).unwrap_or(0)
    }
}

/// Whether a word-match prompt asks for the synonym or the antonym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Synonym,
    Antonym,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Synonym => write!(f, "synonym"),
            MatchKind::Antonym => write!(f, "antonym"),
        }
    }
}

/// A target word with its distractor options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordMatchPrompt {
    pub word: String,
    pub kind: MatchKind,
    pub choices: Vec<String>,
    /// The configured synonym/antonym set; a pick is correct iff it is a
    /// member.
    pub accepted: Vec<String>,
}

/// Rubric tier for decision-simulator choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RubricTier {
    Best,
    Acceptable,
    Poor,
}

/// One possible response to a complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionChoice {
    pub text: String,
    pub tier: RubricTier,
    /// Community happiness swing, carried from the original simulator.
    pub happiness_impact: i32,
}

/// A single complaint brought before the captain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPrompt {
    pub situation: String,
    pub choices: Vec<DecisionChoice>,
}

/// A run of complaints for the Barangay Plaza simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionScript {
    pub id: String,
    pub title: String,
    pub prompts: Vec<DecisionPrompt>,
}

/// One comprehension question about a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index of the correct choice.
    pub answer: usize,
}

/// A recipe passage for Kusina Cove: the student reads the ingredients and
/// directions, then answers questions about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub questions: Vec<RecipeQuestion>,
}

/// One round of the phonics catch game: a target sound plus the symbols
/// that rain down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonicsRound {
    pub target: String,
    pub symbols: Vec<String>,
}

/// All injected gameplay content, one table per game family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTables {
    pub stories: Vec<DialogueStory>,
    pub sentences: Vec<SentenceSet>,
    pub word_match: Vec<WordMatchPrompt>,
    pub decisions: Vec<DecisionScript>,
    pub phonics: Vec<PhonicsRound>,
    pub recipes: Vec<Recipe>,
}

impl ContentTables {
    /// Reject malformed tables before any of it reaches an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for story in &self.stories {
            validate_story(story)?;
        }
        for sentence in &self.sentences {
            validate_sentence(sentence)?;
        }
        for prompt in &self.word_match {
            validate_word_match(prompt)?;
        }
        for script in &self.decisions {
            validate_decision(script)?;
        }
        for recipe in &self.recipes {
            validate_recipe(recipe)?;
        }
        for round in &self.phonics {
            if round.symbols.is_empty() {
                return Err(malformed(format!(
                    "phonics round '{}' has no symbols",
                    round.target
                )));
            }
            if !round.symbols.contains(&round.target) {
                return Err(malformed(format!(
                    "phonics round '{}' never drops its own target",
                    round.target
                )));
            }
        }
        if self.phonics.is_empty() {
            return Err(malformed("phonics table is empty".into()));
        }
        Ok(())
    }
}

fn malformed(detail: String) -> ConfigError {
    ConfigError::MalformedContentTable(detail)
}

fn validate_story(story: &DialogueStory) -> Result<(), ConfigError> {
    if !story.nodes.contains_key(&story.root) {
        return Err(malformed(format!(
            "story '{}' root node '{}' does not exist",
            story.id, story.root
        )));
    }
    for node in story.nodes.values() {
        if node.choices.is_empty() {
            return Err(malformed(format!(
                "story '{}' node '{}' has no outgoing choices",
                story.id, node.id
            )));
        }
        if node.is_question() && node.first_correct().is_none() {
            return Err(malformed(format!(
                "story '{}' node '{}' has no correct choice",
                story.id, node.id
            )));
        }
        for choice in &node.choices {
            if let ChoiceTarget::Node(target) = &choice.target {
                if !story.nodes.contains_key(target) {
                    return Err(malformed(format!(
                        "story '{}' node '{}' points at missing node '{}'",
                        story.id, node.id, target
                    )));
                }
            }
        }
        if let Some(rem) = &node.remediation {
            if !story.nodes.contains_key(rem) {
                return Err(malformed(format!(
                    "story '{}' node '{}' names missing remediation '{}'",
                    story.id, node.id, rem
                )));
            }
        }
    }
    // The correct path must be acyclic and reach a terminal.
    let mut current = story.root.as_str();
    let mut seen = HashSet::new();
    loop {
        if !seen.insert(current.to_string()) {
            return Err(malformed(format!(
                "story '{}' has a cycle on its correct path at '{}'",
                story.id, current
            )));
        }
        let node = story.nodes.get(current).ok_or_else(|| {
            malformed(format!("story '{}' correct path left the graph", story.id))
        })?;
        match node.first_correct().map(|c| c.target.clone()) {
            Some(ChoiceTarget::Terminal) => return Ok(()),
            Some(ChoiceTarget::Node(next)) => {
                current = story
                    .nodes
                    .get_key_value(&next)
                    .map(|(k, _)| k.as_str())
                    .ok_or_else(|| {
                        malformed(format!(
                            "story '{}' correct path points at missing '{}'",
                            story.id, next
                        ))
                    })?;
            }
            None => {
                return Err(malformed(format!(
                    "story '{}' node '{}' dead-ends the correct path",
                    story.id, node.id
                )))
            }
        }
    }
}

fn validate_sentence(sentence: &SentenceSet) -> Result<(), ConfigError> {
    if sentence.accepted.is_empty() {
        return Err(malformed(format!(
            "sentence '{}' accepts no orderings",
            sentence.id
        )));
    }
    let slots = sentence.accepted[0].len();
    if slots == 0 {
        return Err(malformed(format!(
            "sentence '{}' has zero slots",
            sentence.id
        )));
    }
    for ordering in &sentence.accepted {
        if ordering.len() != slots {
            return Err(malformed(format!(
                "sentence '{}' has orderings of mixed length",
                sentence.id
            )));
        }
        // Every accepted word must be buildable from the token pool.
        let mut pool: Vec<&str> = sentence.tokens.iter().map(|t| t.word.as_str()).collect();
        for word in ordering {
            match pool.iter().position(|w| w == word) {
                Some(ix) => {
                    pool.swap_remove(ix);
                }
                None => {
                    return Err(malformed(format!(
                        "sentence '{}' accepts '{}' but no token provides it",
                        sentence.id, word
                    )))
                }
            }
        }
    }
    Ok(())
}

fn validate_word_match(prompt: &WordMatchPrompt) -> Result<(), ConfigError> {
    if prompt.choices.is_empty() {
        return Err(malformed(format!(
            "word-match prompt '{}' has no choices",
            prompt.word
        )));
    }
    if !prompt.choices.iter().any(|c| prompt.accepted.contains(c)) {
        return Err(malformed(format!(
            "word-match prompt '{}' offers no correct choice",
            prompt.word
        )));
    }
    Ok(())
}

fn validate_decision(script: &DecisionScript) -> Result<(), ConfigError> {
    if script.prompts.is_empty() {
        return Err(malformed(format!(
            "decision script '{}' has no prompts",
            script.id
        )));
    }
    for prompt in &script.prompts {
        if prompt.choices.is_empty() {
            return Err(malformed(format!(
                "decision script '{}' has a prompt with no choices",
                script.id
            )));
        }
        if !prompt.choices.iter().any(|c| c.tier == RubricTier::Best) {
            return Err(malformed(format!(
                "decision script '{}' has a prompt with no best response",
                script.id
            )));
        }
    }
    Ok(())
}

fn validate_recipe(recipe: &Recipe) -> Result<(), ConfigError> {
    if recipe.questions.is_empty() {
        return Err(malformed(format!(
            "recipe '{}' has no questions",
            recipe.id
        )));
    }
    for question in &recipe.questions {
        if question.choices.is_empty() {
            return Err(malformed(format!(
                "recipe '{}' has a question with no choices",
                recipe.id
            )));
        }
        if question.answer >= question.choices.len() {
            return Err(malformed(format!(
                "recipe '{}' question '{}' answers out of range",
                recipe.id, question.prompt
            )));
        }
    }
    Ok(())
}

/// The default content shipped with the suite.
pub fn builtin_tables() -> ContentTables {
    ContentTables {
        stories: vec![create_fisherman_story()],
        sentences: create_sentence_sets(),
        word_match: create_word_match_prompts(),
        decisions: vec![create_barangay_script()],
        phonics: create_phonics_rounds(),
        recipes: create_recipe_book(),
    }
}

fn node(
    id: &str,
    prompt: &str,
    choices: Vec<DialogueChoice>,
    remediation: Option<&str>,
    hint: Option<&str>,
) -> DialogueNode {
    DialogueNode {
        id: id.to_string(),
        prompt: prompt.to_string(),
        choices,
        remediation: remediation.map(String::from),
        hint: hint.map(String::from),
    }
}

fn choice(text: &str, correct: bool, target: ChoiceTarget) -> DialogueChoice {
    DialogueChoice {
        text: text.to_string(),
        correct,
        target,
    }
}

/// Branching comprehension story for Story Sea.
pub fn create_fisherman_story() -> DialogueStory {
    let mut nodes = HashMap::new();

    nodes.insert(
        "start".to_string(),
        node(
            "start",
            "Mang Tonyo the fisherman wakes before sunrise. The radio warns of \
             a storm in the afternoon. What should he do first?",
            vec![
                choice(
                    "Check the weather report again and plan a short trip",
                    true,
                    ChoiceTarget::Node("nets".to_string()),
                ),
                choice(
                    "Ignore the radio and sail far out to sea",
                    false,
                    ChoiceTarget::Node("start".to_string()),
                ),
            ],
            Some("remind_weather"),
            Some("The radio said a storm is coming. Plan around it."),
        ),
    );
    nodes.insert(
        "remind_weather".to_string(),
        node(
            "remind_weather",
            "Listen again: 'Storm signal this afternoon. Fishermen are advised \
             to return before noon.' Planning keeps Mang Tonyo safe.",
            vec![choice(
                "Got it, back to the question",
                true,
                ChoiceTarget::Node("start".to_string()),
            )],
            None,
            None,
        ),
    );
    nodes.insert(
        "nets".to_string(),
        node(
            "nets",
            "At the shore, Mang Tonyo finds a hole in his net. Why does he fix \
             it before leaving?",
            vec![
                choice(
                    "So the fish he catches will not escape",
                    true,
                    ChoiceTarget::Node("catch".to_string()),
                ),
                choice(
                    "Because nets look nicer without holes",
                    false,
                    ChoiceTarget::Node("nets".to_string()),
                ),
                choice(
                    "He should throw the net away instead",
                    false,
                    ChoiceTarget::Node("nets".to_string()),
                ),
            ],
            Some("remind_nets"),
            Some("A torn net cannot hold fish."),
        ),
    );
    nodes.insert(
        "remind_nets".to_string(),
        node(
            "remind_nets",
            "A net with a hole lets the catch slip back into the water. \
             Mending it first means the morning's work is not wasted.",
            vec![choice(
                "Got it, back to the question",
                true,
                ChoiceTarget::Node("nets".to_string()),
            )],
            None,
            None,
        ),
    );
    nodes.insert(
        "catch".to_string(),
        node(
            "catch",
            "By late morning the baskets are full. Dark clouds gather on the \
             horizon. What is the wise choice?",
            vec![
                choice(
                    "Head home now, before the storm arrives",
                    true,
                    ChoiceTarget::Node("ending".to_string()),
                ),
                choice(
                    "Stay for one more haul of fish",
                    false,
                    ChoiceTarget::Node("catch".to_string()),
                ),
            ],
            Some("remind_storm"),
            Some("Full baskets are worth nothing in a storm."),
        ),
    );
    nodes.insert(
        "remind_storm".to_string(),
        node(
            "remind_storm",
            "The warning said the storm comes in the afternoon. A wise \
             fisherman trades one more haul for a safe trip home.",
            vec![choice(
                "Got it, back to the question",
                true,
                ChoiceTarget::Node("catch".to_string()),
            )],
            None,
            None,
        ),
    );
    nodes.insert(
        "ending".to_string(),
        node(
            "ending",
            "Mang Tonyo reaches the shore just as the first rain falls. His \
             family eats well tonight because he planned ahead.",
            vec![choice("The end", true, ChoiceTarget::Terminal)],
            None,
            None,
        ),
    );

    DialogueStory {
        id: "fisherman_storm".to_string(),
        title: "Mang Tonyo and the Storm".to_string(),
        root: "start".to_string(),
        nodes,
    }
}

fn sentence(id: &str, prompt: &str, tokens: &[(&str, bool)], accepted: &[&[&str]]) -> SentenceSet {
    SentenceSet {
        id: id.to_string(),
        prompt: prompt.to_string(),
        tokens: tokens
            .iter()
            .map(|(word, locked)| WordToken {
                word: word.to_string(),
                locked: *locked,
            })
            .collect(),
        accepted: accepted
            .iter()
            .map(|ordering| ordering.iter().map(|w| w.to_string()).collect())
            .collect(),
    }
}

/// Sentence-assembly puzzles for Sentence Summit.
pub fn create_sentence_sets() -> Vec<SentenceSet> {
    vec![
        sentence(
            "dog_garden",
            "Build the sentence about the dog",
            &[("the", false), ("dog", false), ("runs", true), ("in", false), ("garden", false), ("the", false)],
            &[&["the", "dog", "runs", "in", "the", "garden"]],
        ),
        sentence(
            "rice_morning",
            "Build the sentence about breakfast. Two orders are correct",
            &[
                ("we", false),
                ("eat", false),
                ("rice", true),
                ("every", false),
                ("morning", false),
            ],
            &[
                &["we", "eat", "rice", "every", "morning"],
                &["every", "morning", "we", "eat", "rice"],
            ],
        ),
        sentence(
            "maria_reads",
            "Build the sentence about Maria",
            &[
                ("maria", false),
                ("reads", true),
                ("a", false),
                ("book", true),
                ("quietly", false),
            ],
            &[
                &["maria", "reads", "a", "book", "quietly"],
                &["quietly", "maria", "reads", "a", "book"],
            ],
        ),
    ]
}

fn word_match(word: &str, kind: MatchKind, choices: &[&str], accepted: &[&str]) -> WordMatchPrompt {
    WordMatchPrompt {
        word: word.to_string(),
        kind,
        choices: choices.iter().map(|s| s.to_string()).collect(),
        accepted: accepted.iter().map(|s| s.to_string()).collect(),
    }
}

/// Synonym/antonym prompts for Word Reef, from the original word list.
pub fn create_word_match_prompts() -> Vec<WordMatchPrompt> {
    use MatchKind::*;
    vec![
        word_match("happy", Synonym, &["joyful", "sad", "angry", "tired"], &["joyful"]),
        word_match("big", Antonym, &["large", "small", "tiny", "huge"], &["small", "tiny"]),
        word_match("fast", Synonym, &["quick", "slow", "rapid", "speedy"], &["quick", "rapid", "speedy"]),
        word_match("hot", Antonym, &["warm", "cold", "cool", "freezing"], &["cold", "freezing"]),
        word_match("bright", Antonym, &["brilliant", "dark", "shiny", "dim"], &["dark", "dim"]),
        word_match("strong", Synonym, &["powerful", "weak", "mighty", "feeble"], &["powerful", "mighty"]),
        word_match("easy", Antonym, &["simple", "difficult", "hard", "complex"], &["difficult", "hard", "complex"]),
        word_match("brave", Synonym, &["courageous", "cowardly", "fearless", "timid"], &["courageous", "fearless"]),
        word_match("empty", Antonym, &["vacant", "full", "hollow", "packed"], &["full", "packed"]),
        word_match("kind", Synonym, &["gentle", "cruel", "nice", "mean"], &["gentle", "nice"]),
        word_match("loud", Antonym, &["noisy", "quiet", "booming", "silent"], &["quiet", "silent"]),
        word_match("fresh", Antonym, &["crisp", "stale", "new", "rotten"], &["stale", "rotten"]),
    ]
}

fn decision(
    situation: &str,
    choices: &[(&str, RubricTier, i32)],
) -> DecisionPrompt {
    DecisionPrompt {
        situation: situation.to_string(),
        choices: choices
            .iter()
            .map(|(text, tier, impact)| DecisionChoice {
                text: text.to_string(),
                tier: *tier,
                happiness_impact: *impact,
            })
            .collect(),
    }
}

/// The Barangay Captain complaint script, from the original simulator.
pub fn create_barangay_script() -> DecisionScript {
    use RubricTier::*;
    DecisionScript {
        id: "barangay_captain".to_string(),
        title: "Barangay Captain Simulator".to_string(),
        prompts: vec![
            decision(
                "Captain, my neighbor's pig escaped and ate my camote patch! \
                 The law says he should pay, but he won't!",
                &[
                    ("Tell the neighbor to be nicer.", Poor, 5),
                    ("Refer to the Barangay Ordinance on Livestock.", Best, 20),
                    ("Go buy more camote.", Poor, -10),
                    ("Organize a community meeting to discuss animal control.", Acceptable, 10),
                ],
            ),
            decision(
                "Captain, there's a big pothole on our street that's causing \
                 accidents. The barangay should fix it!",
                &[
                    ("Say sorry for the inconvenience.", Poor, 5),
                    ("Check the barangay budget for road repairs.", Best, 20),
                    ("Tell them to avoid the pothole.", Poor, -5),
                    ("Report it to the municipal engineer.", Acceptable, 15),
                ],
            ),
            decision(
                "Captain, my child was bullied at school and the teacher did \
                 nothing. What should I do?",
                &[
                    ("Talk to the bully's parents personally.", Poor, 10),
                    ("File a formal complaint with the school administration.", Best, 25),
                    ("Tell my child to fight back.", Poor, -15),
                    ("Seek counseling for both children.", Acceptable, 20),
                ],
            ),
            decision(
                "Captain, the barangay hall roof is leaking during rains. It's \
                 been like this for months!",
                &[
                    ("Express sympathy for the inconvenience.", Poor, 5),
                    ("Review maintenance records and allocate funds for repair.", Best, 20),
                    ("Suggest they use buckets to catch the water.", Poor, -5),
                    ("Contact the municipal office for assistance.", Acceptable, 15),
                ],
            ),
            decision(
                "Captain, someone is dumping garbage in our clean barangay. \
                 The ordinance says it's illegal!",
                &[
                    ("Ask them politely to stop.", Poor, 10),
                    ("Cite the specific anti-littering ordinance and issue a warning.", Best, 25),
                    ("Ignore it since it's not your property.", Poor, -10),
                    ("Organize a barangay clean-up drive.", Acceptable, 20),
                ],
            ),
        ],
    }
}

fn phonics(target: &str, symbols: &[&str]) -> PhonicsRound {
    PhonicsRound {
        target: target.to_string(),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
    }
}

/// Letter-catching rounds for Phonics Forest.
pub fn create_phonics_rounds() -> Vec<PhonicsRound> {
    vec![
        phonics("B", &["B", "D", "P"]),
        phonics("M", &["M", "N", "W"]),
        phonics("S", &["S", "Z", "C"]),
        phonics("NG", &["NG", "N", "G"]),
        phonics("T", &["T", "D", "K"]),
        phonics("L", &["L", "R", "I"]),
        phonics("K", &["K", "C", "G"]),
        phonics("A", &["A", "E", "O"]),
    ]
}

fn recipe_question(prompt: &str, choices: &[&str], answer: usize) -> RecipeQuestion {
    RecipeQuestion {
        prompt: prompt.to_string(),
        choices: choices.iter().map(|s| s.to_string()).collect(),
        answer,
    }
}

/// Recipe passages for Kusina Cove, from the original recipe list.
pub fn create_recipe_book() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "tinola".to_string(),
            title: "Tinola".to_string(),
            ingredients: [
                "1 whole chicken, cut into pieces",
                "2 tablespoons cooking oil",
                "1 onion, chopped",
                "2 cloves garlic, minced",
                "1 thumb-sized ginger, sliced",
                "4 cups water",
                "2 green papaya, peeled and cubed",
                "2 tablespoons fish sauce",
                "Salt and pepper to taste",
                "Calamansi (optional)",
            ]
            .map(String::from)
            .to_vec(),
            directions: [
                "Heat oil in a pot over medium heat.",
                "Sauté garlic, onion, and ginger until fragrant.",
                "Add chicken pieces and cook until lightly browned.",
                "Pour in water and bring to a boil.",
                "Add fish sauce, salt, and pepper.",
                "Simmer for 20 minutes or until chicken is tender.",
                "Add papaya cubes and cook for another 10 minutes.",
                "Serve hot with calamansi on the side.",
            ]
            .map(String::from)
            .to_vec(),
            questions: vec![
                recipe_question(
                    "What is the first step in cooking Tinola?",
                    &[
                        "Add chicken",
                        "Heat oil and sauté garlic, onion, and ginger",
                        "Add water",
                    ],
                    1,
                ),
                recipe_question(
                    "How many cups of water are needed?",
                    &["2 cups", "4 cups", "6 cups"],
                    1,
                ),
                recipe_question(
                    "What vegetable is added last?",
                    &["Onion", "Ginger", "Green papaya"],
                    2,
                ),
            ],
        },
        Recipe {
            id: "champorado".to_string(),
            title: "Champorado".to_string(),
            ingredients: [
                "1 cup glutinous rice",
                "6 cups water",
                "4 tablespoons cocoa powder",
                "1/2 cup sugar",
                "Condensed milk for serving",
            ]
            .map(String::from)
            .to_vec(),
            directions: [
                "Bring the water to a boil in a pot.",
                "Add the glutinous rice and stir well.",
                "Dissolve the cocoa powder in a little hot water, then pour it in.",
                "Simmer while stirring until the rice is soft and thick.",
                "Stir in the sugar.",
                "Serve warm with a drizzle of condensed milk.",
            ]
            .map(String::from)
            .to_vec(),
            questions: vec![
                recipe_question(
                    "What kind of rice does Champorado use?",
                    &["Glutinous rice", "Brown rice", "Fried rice"],
                    0,
                ),
                recipe_question(
                    "When is the sugar stirred in?",
                    &[
                        "Before the water boils",
                        "After the rice is soft and thick",
                        "Only when serving",
                    ],
                    1,
                ),
                recipe_question(
                    "What is drizzled on top when serving?",
                    &["Fish sauce", "Calamansi juice", "Condensed milk"],
                    2,
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_validate() {
        builtin_tables().validate().unwrap();
    }

    #[test]
    fn story_with_missing_target_is_rejected() {
        let mut story = create_fisherman_story();
        story
            .nodes
            .get_mut("catch")
            .unwrap()
            .choices
            .push(choice("Sail north", false, ChoiceTarget::Node("nowhere".into())));
        let tables = ContentTables {
            stories: vec![story],
            ..builtin_tables()
        };
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::MalformedContentTable(_))
        ));
    }

    #[test]
    fn correct_path_cycle_is_rejected() {
        let mut nodes = HashMap::new();
        nodes.insert(
            "a".to_string(),
            node("a", "loop", vec![choice("go", true, ChoiceTarget::Node("a".into()))], None, None),
        );
        let story = DialogueStory {
            id: "loop".into(),
            title: "Loop".into(),
            root: "a".into(),
            nodes,
        };
        assert!(validate_story(&story).is_err());
    }

    #[test]
    fn sentence_with_unbuildable_ordering_is_rejected() {
        let bad = sentence(
            "bad",
            "broken",
            &[("the", false), ("dog", false)],
            &[&["the", "cat"]],
        );
        assert!(validate_sentence(&bad).is_err());
    }

    #[test]
    fn sentence_orderings_share_length() {
        let bad = SentenceSet {
            id: "bad".into(),
            prompt: "broken".into(),
            tokens: vec![WordToken { word: "a".into(), locked: false }],
            accepted: vec![vec!["a".into()], vec!["a".into(), "a".into()]],
        };
        assert!(validate_sentence(&bad).is_err());
    }

    #[test]
    fn recipe_answer_out_of_range_is_rejected() {
        let mut book = create_recipe_book();
        book[0].questions[0].answer = 99;
        let tables = ContentTables {
            recipes: book,
            ..builtin_tables()
        };
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::MalformedContentTable(_))
        ));
    }

    #[test]
    fn fisherman_correct_path_counts() {
        let story = create_fisherman_story();
        let (steps, questions) = story.correct_path_profile();
        assert_eq!(steps, 4); // start, nets, catch, ending
        assert_eq!(questions, 3);
    }
}
