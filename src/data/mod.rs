//! Data structures for the game world
//!
//! Defines module identifiers, student records, and content tables.

pub mod config;
pub mod content;
pub mod profile;

pub use config::*;
pub use content::*;
pub use profile::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifiers for the mini-game zones.
///
/// The declaration order is the intended progression order; unlock
/// thresholds are expected to be non-decreasing along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModuleId {
    PhonicsForest,
    SentenceSummit,
    StorySea,
    BarangayPlaza,
    WordReef,
    KusinaCove,
}

impl ModuleId {
    /// Every module, in progression order.
    pub fn all() -> [ModuleId; 6] {
        [
            ModuleId::PhonicsForest,
            ModuleId::SentenceSummit,
            ModuleId::StorySea,
            ModuleId::BarangayPlaza,
            ModuleId::WordReef,
            ModuleId::KusinaCove,
        ]
    }

    /// The module every student can always enter.
    pub fn starter() -> ModuleId {
        ModuleId::PhonicsForest
    }

    /// Display name shown on the hub map.
    pub fn title(&self) -> &'static str {
        match self {
            ModuleId::PhonicsForest => "Phonics Forest",
            ModuleId::SentenceSummit => "Sentence Summit",
            ModuleId::StorySea => "Story Sea",
            ModuleId::BarangayPlaza => "Barangay Plaza",
            ModuleId::WordReef => "Word Reef",
            ModuleId::KusinaCove => "Kusina Cove",
        }
    }

    /// One-line description for the hub menu.
    pub fn blurb(&self) -> &'static str {
        match self {
            ModuleId::PhonicsForest => "Catch the falling letters that match the sound",
            ModuleId::SentenceSummit => "Build sentences from word blocks",
            ModuleId::StorySea => "Sail through a branching story",
            ModuleId::BarangayPlaza => "Help the captain settle complaints",
            ModuleId::WordReef => "Match words with their synonyms and antonyms",
            ModuleId::KusinaCove => "Read a recipe, then answer questions about it",
        }
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A unique identifier wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}
