//! Arena configuration. Loaded from `arena.ron` at startup; the tuning half
//! can be swapped between ticks through [`LiveSettings`].

use geosphere::{EdgeParams, TopologyParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ArenaError;

/// Pillar behaviour, expressed as fractions of the sphere radius where a
/// length is involved so the same file works for any arena size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarTuning {
    /// Highest a pillar may extend, as a fraction of R.
    #[serde(default = "default_max_height_percentage")]
    pub max_height_percentage: f32,
    /// Lowest a pillar may retract to, as a fraction of R.
    #[serde(default)]
    pub min_height_percentage: f32,
    /// Height every pillar starts at and decays back to.
    #[serde(default = "default_initial_height_percentage")]
    pub initial_height_percentage: f32,
    /// Height change per hit, as a fraction of R.
    #[serde(default = "default_extension_delta_percentage")]
    pub extension_delta_percentage: f32,
    /// Seconds a full-delta ease takes.
    #[serde(default = "default_base_ease_duration")]
    pub base_ease_duration: f32,
    /// Seconds without a hit before a displaced pillar eases back to its initial height.
    #[serde(default = "default_decay_delay")]
    pub decay_delay: f32,
    /// Impulse per world unit of remaining rise handed to bodies standing on a struck pillar.
    /// The impulse points along the surface up at the body: toward the sphere
    /// origin on an interior surface, away from it on an exterior one.
    #[serde(default = "default_launch_multiplier")]
    pub launch_multiplier: f32,
}

fn default_max_height_percentage() -> f32 {
    0.5
}
fn default_initial_height_percentage() -> f32 {
    0.1
}
fn default_extension_delta_percentage() -> f32 {
    0.1
}
fn default_base_ease_duration() -> f32 {
    0.5
}
fn default_decay_delay() -> f32 {
    10.0
}
fn default_launch_multiplier() -> f32 {
    60.0
}

impl Default for PillarTuning {
    fn default() -> Self {
        Self {
            max_height_percentage: default_max_height_percentage(),
            min_height_percentage: 0.0,
            initial_height_percentage: default_initial_height_percentage(),
            extension_delta_percentage: default_extension_delta_percentage(),
            base_ease_duration: default_base_ease_duration(),
            decay_delay: default_decay_delay(),
            launch_multiplier: default_launch_multiplier(),
        }
    }
}

impl PillarTuning {
    pub fn validate(&self) -> Result<(), ArenaError> {
        let fractions = [
            ("max_height_percentage", self.max_height_percentage),
            ("min_height_percentage", self.min_height_percentage),
            ("initial_height_percentage", self.initial_height_percentage),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ArenaError::InvalidConfig(format!("{name} must be in 0..=1, got {value}")));
            }
        }
        if self.min_height_percentage >= self.max_height_percentage {
            return Err(ArenaError::InvalidConfig(format!(
                "min_height_percentage ({}) must be below max_height_percentage ({})",
                self.min_height_percentage, self.max_height_percentage
            )));
        }
        if self.initial_height_percentage < self.min_height_percentage
            || self.initial_height_percentage > self.max_height_percentage
        {
            return Err(ArenaError::InvalidConfig(format!(
                "initial_height_percentage ({}) must lie between min and max",
                self.initial_height_percentage
            )));
        }
        let positive = [
            ("extension_delta_percentage", self.extension_delta_percentage),
            ("base_ease_duration", self.base_ease_duration),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ArenaError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.decay_delay >= 0.0) || !(self.launch_multiplier >= 0.0) {
            return Err(ArenaError::InvalidConfig(
                "decay_delay and launch_multiplier must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the fractions against a sphere radius.
    pub fn limits(&self, sphere_radius: f32) -> PillarLimits {
        PillarLimits {
            min_height: self.min_height_percentage * sphere_radius,
            max_height: self.max_height_percentage * sphere_radius,
            initial_height: self.initial_height_percentage * sphere_radius,
            delta: self.extension_delta_percentage * sphere_radius,
            base_ease_duration: self.base_ease_duration,
            decay_delay: self.decay_delay,
            launch_multiplier: self.launch_multiplier,
        }
    }
}

/// [`PillarTuning`] in world units for one arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarLimits {
    pub min_height: f32,
    pub max_height: f32,
    pub initial_height: f32,
    pub delta: f32,
    pub base_ease_duration: f32,
    pub decay_delay: f32,
    pub launch_multiplier: f32,
}

impl PillarLimits {
    /// Heights closer than this are considered equal.
    pub fn tolerance(&self) -> f32 {
        self.delta * 1e-4
    }

    pub fn clamp(&self, height: f32) -> f32 {
        height.clamp(self.min_height, self.max_height)
    }
}

/// Settings that may change while a match is running. Staged with
/// [`crate::Arena::stage_live_settings`] and applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LiveSettings {
    #[serde(default)]
    pub edges: EdgeParams,
    #[serde(default)]
    pub pillars: PillarTuning,
}

/// Arena settings. Loaded from `arena.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub topology: TopologyParams,
    #[serde(default)]
    pub pillars: PillarTuning,
    /// Simulation ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    /// Length of each pillar's collision column below its top face, as a fraction of R.
    #[serde(default = "default_column_depth_percentage")]
    pub column_depth_percentage: f32,
}

fn default_tick_rate() -> f64 {
    60.0
}
fn default_column_depth_percentage() -> f32 {
    0.6
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            topology: TopologyParams::default(),
            pillars: PillarTuning::default(),
            tick_rate: default_tick_rate(),
            column_depth_percentage: default_column_depth_percentage(),
        }
    }
}

impl ArenaConfig {
    /// Load config from `arena.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::from_ron(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Save current config to `arena.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        self.topology.validate()?;
        self.pillars.validate()?;
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        if !(self.column_depth_percentage > 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "column_depth_percentage must be positive, got {}",
                self.column_depth_percentage
            )));
        }
        Ok(())
    }

    pub fn limits(&self) -> PillarLimits {
        self.pillars.limits(self.topology.sphere_radius)
    }

    pub fn column_depth(&self) -> f32 {
        self.column_depth_percentage * self.topology.sphere_radius
    }

    pub fn live_settings(&self) -> LiveSettings {
        LiveSettings {
            edges: self.topology.edges,
            pillars: self.pillars,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("arena.ron")
}
