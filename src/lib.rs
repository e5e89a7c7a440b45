//! Invader Rush - A browser arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `game`: Session driver owning the scheduler, RNG and event log
//! - `settings`: Player preferences (key bindings)
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use settings::{Action, KeyBindings, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// All positions are normalized to the playfield: `x` in [0, 1] left to
/// right, `y` in [0, 1] top to bottom.
pub mod consts {
    /// Simulation tick period (ms)
    pub const TICK_MS: u32 = 50;

    /// Player horizontal step per key press
    pub const PLAYER_STEP: f32 = 0.05;
    pub const PLAYER_MIN_X: f32 = 0.05;
    pub const PLAYER_MAX_X: f32 = 0.95;
    pub const PLAYER_START_X: f32 = 0.5;
    /// Fixed vertical position of the ship (5% above the bottom edge)
    pub const PLAYER_Y: f32 = 0.95;

    /// Bullet travel per tick (upwards)
    pub const BULLET_SPEED: f32 = 0.02;
    pub const BULLET_START_Y: f32 = 0.9;
    /// Bullets at or above this line (y <= value) are pruned
    pub const BULLET_PRUNE_Y: f32 = -0.1;

    /// Enemy descent per tick at the start of a round
    pub const ENEMY_START_SPEED: f32 = 0.005;
    pub const ENEMY_MAX_SPEED: f32 = 0.02;
    pub const ENEMY_SPEED_STEP: f32 = 0.002;
    /// Enemies at or below this line (y >= value) have escaped
    pub const ENEMY_ESCAPE_Y: f32 = 1.0;
    /// Horizontal spawn band
    pub const ENEMY_SPAWN_MIN_X: f32 = 0.05;
    pub const ENEMY_SPAWN_MAX_X: f32 = 0.95;

    /// Spawn timer period (ms)
    pub const SPAWN_INTERVAL_MS: u32 = 2000;
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 500;
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 200;
    /// Kills per difficulty milestone (and per extra enemy in a batch)
    pub const KILL_THRESHOLD: u32 = 5;
    pub const MAX_SPAWN_BATCH: u32 = 10;

    /// Magazine size
    pub const MAX_AMMO: u32 = 4;
    pub const RELOAD_MS: u32 = 1000;

    /// Per-axis bullet/enemy hit distance
    pub const HIT_DISTANCE: f32 = 0.05;
    /// Horizontal enemy/ship contact distance
    pub const PLAYER_HIT_DISTANCE: f32 = 0.05;
    /// Enemies below this line (y > value) can reach the ship
    pub const DANGER_Y: f32 = 0.9;
}
