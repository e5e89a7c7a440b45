//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (passed in by the caller)
//! - Virtual time only (the scheduler never reads a clock)
//! - No rendering or platform dependencies

pub mod ammo;
pub mod collision;
pub mod difficulty;
pub mod input;
pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ammo::{FireOutcome, fire, finish_reload};
pub use collision::{Hit, overlaps, player_struck, resolve_hits};
pub use difficulty::Difficulty;
pub use input::{Intent, apply_intent, autopilot};
pub use scheduler::{Fired, Scheduler, TimerKind};
pub use spawn::{batch_size, spawn_wave};
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickReport, tick};
