//! Literacy Quest: An Island Reading Adventure
//!
//! An offline educational game suite for early readers. Six mini-game
//! zones sit behind a hub map; finishing a zone earns Knowledge Gems, and
//! gems open the later zones. All progress lives in a local file so the
//! game runs without any network at all.
//!
//! # Game Mechanics
//!
//! - **Zones**: phonics catch, sentence building, a branching story,
//!   a barangay decision simulator, a word-match quiz, and a recipe
//!   reading quiz
//! - **Knowledge Gems**: every 10 points of score earns a gem
//! - **Gentle help**: idle and hover timers offer hints, never penalties
//! - **Teacher dashboard**: password-gated class progress report
//!
//! # Architecture
//!
//! - `game` - Screen controller, unlock policy, mini-game engines
//! - `tui` - Terminal user interface with ratatui
//! - `data` - Module identifiers, student records, content tables, config
//! - `store` - Durable progress storage with an in-memory fallback

pub mod data;
pub mod game;
pub mod store;
pub mod tui;

pub use data::*;
pub use game::Controller;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;
