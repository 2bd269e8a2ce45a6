//! Match configuration (bots, shooting, duration). Loaded from match.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Headless match settings. Loaded from `match.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Simulated seconds to run before exiting.
    #[serde(default = "default_duration")]
    pub duration_seconds: f32,
    /// Number of bots dropped on random tiles.
    #[serde(default = "default_bot_count")]
    pub bot_count: u32,
    /// Average shots per bot per second.
    #[serde(default = "default_fire_rate")]
    pub fire_rate: f32,
    /// Fraction of shots that retract instead of extend.
    #[serde(default = "default_retract_chance")]
    pub retract_chance: f64,
    /// Seed for bot placement and aiming; equal seeds replay equal matches.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Distance from a bot's origin down to its feet.
    #[serde(default = "default_foot_offset")]
    pub foot_offset: f32,
    /// Seconds between round resets; 0 disables them.
    #[serde(default)]
    pub round_length: f32,
}

fn default_duration() -> f32 {
    30.0
}
fn default_bot_count() -> u32 {
    8
}
fn default_fire_rate() -> f32 {
    2.0
}
fn default_retract_chance() -> f64 {
    0.25
}
fn default_seed() -> u64 {
    0x5EED
}
fn default_foot_offset() -> f32 {
    0.9
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration(),
            bot_count: default_bot_count(),
            fire_rate: default_fire_rate(),
            retract_chance: default_retract_chance(),
            seed: default_seed(),
            foot_offset: default_foot_offset(),
            round_length: 0.0,
        }
    }
}

impl MatchConfig {
    /// Load config from `match.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("match.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let c: MatchConfig = ron::from_str("(bot_count: 2, seed: 9)").unwrap();
        assert_eq!(c.bot_count, 2);
        assert_eq!(c.seed, 9);
        assert_eq!(c.fire_rate, default_fire_rate());
        assert_eq!(c.round_length, 0.0);
    }
}
