//! Data-driven game balance
//!
//! Every balance knob the simulation reads lives in [`Tuning`]. The defaults
//! mirror [`crate::consts`]; hosts may override them from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub tick_ms: u32,

    pub player_step: f32,
    pub player_min_x: f32,
    pub player_max_x: f32,
    pub player_start_x: f32,

    pub bullet_speed: f32,
    pub bullet_start_y: f32,

    pub enemy_start_speed: f32,
    pub enemy_max_speed: f32,
    pub enemy_speed_step: f32,
    pub enemy_spawn_min_x: f32,
    pub enemy_spawn_max_x: f32,

    pub spawn_interval_ms: u32,
    pub min_spawn_interval_ms: u32,
    pub spawn_interval_step_ms: u32,
    /// Kills per difficulty milestone
    pub kill_threshold: u32,
    pub max_spawn_batch: u32,

    pub max_ammo: u32,
    pub reload_ms: u32,

    pub hit_distance: f32,
    pub player_hit_distance: f32,
    /// Enemies below this line can end the round
    pub danger_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,

            player_step: PLAYER_STEP,
            player_min_x: PLAYER_MIN_X,
            player_max_x: PLAYER_MAX_X,
            player_start_x: PLAYER_START_X,

            bullet_speed: BULLET_SPEED,
            bullet_start_y: BULLET_START_Y,

            enemy_start_speed: ENEMY_START_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_speed_step: ENEMY_SPEED_STEP,
            enemy_spawn_min_x: ENEMY_SPAWN_MIN_X,
            enemy_spawn_max_x: ENEMY_SPAWN_MAX_X,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            kill_threshold: KILL_THRESHOLD,
            max_spawn_batch: MAX_SPAWN_BATCH,

            max_ammo: MAX_AMMO,
            reload_ms: RELOAD_MS,

            hit_distance: HIT_DISTANCE,
            player_hit_distance: PLAYER_HIT_DISTANCE,
            danger_y: DANGER_Y,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, value })
            }
        }

        positive("tick_ms", self.tick_ms as f64)?;
        positive("player_step", self.player_step as f64)?;
        positive("bullet_speed", self.bullet_speed as f64)?;
        positive("enemy_start_speed", self.enemy_start_speed as f64)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms as f64)?;
        positive("kill_threshold", self.kill_threshold as f64)?;
        positive("max_spawn_batch", self.max_spawn_batch as f64)?;
        positive("max_ammo", self.max_ammo as f64)?;
        positive("hit_distance", self.hit_distance as f64)?;

        if !(0.0..=1.0).contains(&self.player_min_x) || self.player_min_x > self.player_max_x {
            return Err(TuningError::OutOfRange {
                field: "player_min_x",
                value: self.player_min_x as f64,
            });
        }
        if self.player_max_x > 1.0 {
            return Err(TuningError::OutOfRange {
                field: "player_max_x",
                value: self.player_max_x as f64,
            });
        }
        if !(self.player_min_x..=self.player_max_x).contains(&self.player_start_x) {
            return Err(TuningError::OutOfRange {
                field: "player_start_x",
                value: self.player_start_x as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.enemy_spawn_min_x)
            || self.enemy_spawn_min_x > self.enemy_spawn_max_x
        {
            return Err(TuningError::OutOfRange {
                field: "enemy_spawn_min_x",
                value: self.enemy_spawn_min_x as f64,
            });
        }
        if self.enemy_spawn_max_x > 1.0 {
            return Err(TuningError::OutOfRange {
                field: "enemy_spawn_max_x",
                value: self.enemy_spawn_max_x as f64,
            });
        }
        if !(self.danger_y > 0.0 && self.danger_y <= 1.0) {
            return Err(TuningError::OutOfRange {
                field: "danger_y",
                value: self.danger_y as f64,
            });
        }
        if self.enemy_max_speed < self.enemy_start_speed {
            return Err(TuningError::OutOfRange {
                field: "enemy_max_speed",
                value: self.enemy_max_speed as f64,
            });
        }
        if self.spawn_interval_ms < self.min_spawn_interval_ms {
            return Err(TuningError::OutOfRange {
                field: "spawn_interval_ms",
                value: self.spawn_interval_ms as f64,
            });
        }
        Ok(())
    }
}
