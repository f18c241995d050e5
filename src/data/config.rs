//! Runtime configuration
//!
//! Unlock thresholds, assistive timer durations, the teacher credential, and
//! the content tables are all injected data. A deployment ships a JSON file;
//! without one the built-in defaults apply.

use super::content::{builtin_tables, ContentTables};
use super::ModuleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Configuration failures surfaced at load time.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing unlock threshold for {0}")]
    MissingThreshold(ModuleId),

    #[error("malformed content table: {0}")]
    MalformedContentTable(String),
}

/// Everything the core consumes as configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Gem requirement per module, non-decreasing in progression order.
    pub thresholds: BTreeMap<ModuleId, u32>,

    /// Idle time before a hint is offered, in milliseconds.
    pub hint_delay_ms: u64,

    /// Hover time before contextual help is offered, in milliseconds.
    pub hover_hint_delay_ms: u64,

    /// Points awarded per correct answer across all games.
    pub points_per_correct: u32,

    /// Wrong-answer retries before a dialogue question auto-advances.
    pub dialogue_retry_limit: u32,

    /// Rounds per phonics run.
    pub phonics_round_limit: usize,

    /// Wall-clock cap on a phonics run, in seconds.
    pub phonics_time_limit_secs: u64,

    /// Secret for the teacher dashboard.
    pub teacher_password: String,

    /// Student identity for this installation (one device, one student).
    pub student_id: String,

    /// Fullscreen deployment mode; quit keys are disabled when set.
    pub kiosk_mode: bool,

    /// Path of the progress store file.
    pub progress_path: String,

    pub content: ContentTables,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(ModuleId::PhonicsForest, 0);
        thresholds.insert(ModuleId::SentenceSummit, 10);
        thresholds.insert(ModuleId::StorySea, 20);
        thresholds.insert(ModuleId::BarangayPlaza, 30);
        thresholds.insert(ModuleId::WordReef, 40);
        thresholds.insert(ModuleId::KusinaCove, 50);

        Self {
            thresholds,
            hint_delay_ms: 5000,
            hover_hint_delay_ms: 3000,
            points_per_correct: 10,
            dialogue_retry_limit: 2,
            phonics_round_limit: 8,
            phonics_time_limit_secs: 120,
            teacher_password: "konekta2026".to_string(),
            student_id: "student_demo".to_string(),
            kiosk_mode: false,
            progress_path: "progress.json".to_string(),
            content: builtin_tables(),
        }
    }
}

impl GameConfig {
    /// Load a config file, or fall back to the built-in defaults when the
    /// path does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let raw = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::MalformedContentTable(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate thresholds and content tables. Nothing partially loaded ever
    /// reaches the controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for module in ModuleId::all() {
            if !self.thresholds.contains_key(&module) {
                return Err(ConfigError::MissingThreshold(module));
            }
        }
        self.content.validate()
    }

    /// Gem requirement for a module. The starter is always free, whatever
    /// the table says.
    pub fn threshold(&self, module: ModuleId) -> u32 {
        if module == ModuleId::starter() {
            return 0;
        }
        self.thresholds.get(&module).copied().unwrap_or(0)
    }

    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub fn hover_hint_delay(&self) -> Duration {
        Duration::from_millis(self.hover_hint_delay_ms)
    }

    pub fn phonics_time_limit(&self) -> Duration {
        Duration::from_secs(self.phonics_time_limit_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_threshold_is_rejected() {
        let mut config = GameConfig::default();
        config.thresholds.remove(&ModuleId::StorySea);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingThreshold(ModuleId::StorySea))
        ));
    }

    #[test]
    fn starter_threshold_is_always_zero() {
        let mut config = GameConfig::default();
        config.thresholds.insert(ModuleId::PhonicsForest, 99);
        assert_eq!(config.threshold(ModuleId::PhonicsForest), 0);
    }

    #[test]
    fn malformed_content_is_rejected() {
        let mut config = GameConfig::default();
        config.content.phonics.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MalformedContentTable(_))
        ));
    }
}
