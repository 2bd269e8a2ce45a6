//! Pillar arena: per-tile height state on top of a geosphere lattice.
//!
//! The [`Arena`] owns the lattice and the runtime state of every tile. Hits come
//! in as [`HitEvent`]s (the only data replicated between participants), time
//! advances through [`Arena::tick`], and the results come back as a
//! [`TickOutput`] of events and launch impulses for the physics owner to apply.

pub mod arena;
pub mod config;
pub mod error;
pub mod events;
pub mod probe;
pub mod render;
pub mod state;

pub use arena::Arena;
pub use config::{ArenaConfig, LiveSettings, PillarLimits, PillarTuning};
pub use error::ArenaError;
pub use events::{HitEvent, HitKind, HitLog, TickOutput, TileEvent};
pub use probe::{BodyProbe, NoBodies};
pub use render::TileRenderData;
pub use state::{HitOutcome, StepOutcome, TileRuntime, TileState};
