//! Per-tile height state machine.
//!
//! A pillar rests at a height, eases toward a new target after a hit, locks
//! once it reaches full extension and is removed for good when retracted past
//! its minimum. Everything here is a pure function of the runtime fields, the
//! resolved [`PillarLimits`] and the elapsed step, so every participant that
//! applies the same hits on the same ticks computes bit-identical heights.

use crate::config::PillarLimits;
use crate::events::HitKind;

/// Remaining ease time below which an ease snaps to its target.
pub const EASE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    Resting,
    Extending,
    Retracting,
    Locked,
    Destroyed,
}

/// What a single hit did to a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Locked or destroyed tile, or a hit that could not move the target.
    Ignored,
    Eased { target: f32, duration: f32 },
    Locked,
    Destroyed,
}

/// What a single step did to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    pub height_before: f32,
    pub moved: bool,
    /// Set on the first rising step after a priming hit: the rise still to come.
    pub launch: Option<f32>,
    pub locked: bool,
}

/// Dynamic state of one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRuntime {
    pub current_height: f32,
    pub target_height: f32,
    /// Seconds left in the current ease; zero when resting.
    pub time_to_target: f32,
    pub ease_start: f32,
    pub ease_duration: f32,
    pub locked: bool,
    pub destroyed: bool,
    /// Next rising step launches whoever stands on the tile.
    pub primed: bool,
    pub since_last_hit: f32,
    pub needs_geometry_refresh: bool,
}

impl TileRuntime {
    pub fn new(height: f32) -> Self {
        Self {
            current_height: height,
            target_height: height,
            time_to_target: 0.0,
            ease_start: height,
            ease_duration: 0.0,
            locked: false,
            destroyed: false,
            primed: false,
            since_last_hit: 0.0,
            needs_geometry_refresh: true,
        }
    }

    pub fn state(&self) -> TileState {
        if self.destroyed {
            TileState::Destroyed
        } else if self.locked {
            TileState::Locked
        } else if !self.is_easing() {
            TileState::Resting
        } else if self.target_height >= self.current_height {
            TileState::Extending
        } else {
            TileState::Retracting
        }
    }

    pub fn is_easing(&self) -> bool {
        self.time_to_target > 0.0
    }

    /// Whether hits can still change this tile.
    pub fn accepts_hits(&self) -> bool {
        !self.locked && !self.destroyed
    }

    fn begin_ease(&mut self, target: f32, duration: f32) {
        self.ease_start = self.current_height;
        self.target_height = target;
        self.ease_duration = duration;
        self.time_to_target = duration;
    }

    fn lock(&mut self) {
        self.locked = true;
        self.primed = false;
        self.time_to_target = 0.0;
        self.needs_geometry_refresh = true;
    }

    /// Apply one hit. The base is whichever of the current height and target
    /// lies further in the hit's direction: hits landing on the same tick stack,
    /// and a hit never moves a pillar against its own direction.
    pub fn hit(&mut self, kind: HitKind, limits: &PillarLimits) -> HitOutcome {
        if !self.accepts_hits() {
            return HitOutcome::Ignored;
        }
        self.since_last_hit = 0.0;
        let tol = limits.tolerance();

        match kind {
            HitKind::Extend => {
                let base = self.target_height.max(self.current_height);
                if !self.is_easing() && self.current_height >= limits.max_height - tol {
                    self.current_height = limits.max_height;
                    self.target_height = limits.max_height;
                    self.lock();
                    return HitOutcome::Locked;
                }
                let actual = (base + limits.delta).min(limits.max_height);
                if actual - base <= tol {
                    // Already heading for max; the running ease locks on arrival.
                    return HitOutcome::Ignored;
                }
                let duration = limits.base_ease_duration * (actual - base) / limits.delta;
                let rising = self.state() == TileState::Extending;
                self.begin_ease(actual, duration);
                self.primed |= !rising;
                HitOutcome::Eased {
                    target: actual,
                    duration,
                }
            }
            HitKind::Retract => {
                if !self.is_easing() && self.current_height <= limits.min_height + tol {
                    self.destroyed = true;
                    self.primed = false;
                    self.time_to_target = 0.0;
                    self.needs_geometry_refresh = true;
                    return HitOutcome::Destroyed;
                }
                let base = self.target_height.min(self.current_height);
                let actual = (base - limits.delta).max(limits.min_height);
                if base - actual <= tol {
                    return HitOutcome::Ignored;
                }
                let duration = limits.base_ease_duration * (base - actual) / limits.delta;
                self.begin_ease(actual, duration);
                self.primed = false;
                HitOutcome::Eased {
                    target: actual,
                    duration,
                }
            }
        }
    }

    /// Advance by `dt` seconds: run the ease, lock at full extension, or start
    /// decaying back toward the initial height.
    pub fn step(&mut self, dt: f32, limits: &PillarLimits) -> StepOutcome {
        let mut out = StepOutcome {
            height_before: self.current_height,
            ..StepOutcome::default()
        };
        if self.destroyed || self.locked {
            return out;
        }
        self.since_last_hit += dt;

        if !self.is_easing() {
            let away = (self.current_height - limits.initial_height).abs();
            if away > limits.tolerance() && self.since_last_hit >= limits.decay_delay {
                let duration = limits.base_ease_duration * away / limits.delta;
                self.begin_ease(limits.initial_height, duration);
                log::trace!("Tile decaying from {:.3} to {:.3}", self.current_height, limits.initial_height);
            } else {
                return out;
            }
        }

        self.time_to_target -= dt;
        if self.time_to_target < EASE_EPSILON {
            self.time_to_target = 0.0;
            self.current_height = self.target_height;
        } else {
            let progress = (1.0 - self.time_to_target / self.ease_duration).clamp(0.0, 1.0);
            self.current_height = self.ease_start + (self.target_height - self.ease_start) * progress.sqrt();
        }
        self.current_height = limits.clamp(self.current_height);

        out.moved = self.current_height != out.height_before;
        if out.moved {
            self.needs_geometry_refresh = true;
        }
        if self.primed && self.current_height > out.height_before {
            out.launch = Some(self.target_height - out.height_before);
            self.primed = false;
        }
        if !self.is_easing() && self.current_height >= limits.max_height - limits.tolerance() {
            self.lock();
            out.locked = true;
        }
        out
    }

    /// Overwrite the height directly, cancelling any ease and clearing the lock.
    /// Returns true when `height` had to be clamped.
    pub fn set_height(&mut self, height: f32, limits: &PillarLimits) -> bool {
        let clamped = limits.clamp(height);
        self.current_height = clamped;
        self.target_height = clamped;
        self.ease_start = clamped;
        self.time_to_target = 0.0;
        self.ease_duration = 0.0;
        self.locked = false;
        self.primed = false;
        self.since_last_hit = 0.0;
        self.needs_geometry_refresh = true;
        clamped != height
    }

    /// Back to the initial height, alive and unlocked.
    pub fn reset(&mut self, limits: &PillarLimits) {
        *self = Self::new(limits.initial_height);
    }
}
