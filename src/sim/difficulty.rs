//! Difficulty ramp keyed on cumulative kills

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Per-round difficulty scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Enemy descent per tick
    pub enemy_speed: f32,
    /// Spawn timer period (ms)
    pub spawn_interval_ms: u32,
}

impl Difficulty {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            enemy_speed: tuning.enemy_start_speed,
            spawn_interval_ms: tuning.spawn_interval_ms,
        }
    }

    /// Apply one milestone: faster enemies, shorter spawn period, both clamped
    pub fn raise(&mut self, tuning: &Tuning) {
        self.enemy_speed = (self.enemy_speed + tuning.enemy_speed_step).min(tuning.enemy_max_speed);
        self.spawn_interval_ms = self
            .spawn_interval_ms
            .saturating_sub(tuning.spawn_interval_step_ms)
            .max(tuning.min_spawn_interval_ms);
    }
}

/// Number of kill milestones passed going from `before` to `after` kills
pub fn milestones_crossed(before: u32, after: u32, threshold: u32) -> u32 {
    if threshold == 0 || after <= before {
        return 0;
    }
    after / threshold - before / threshold
}

/// Raise difficulty once per milestone reached since `kills_before`.
/// Returns the number of milestones applied.
pub fn apply_kills(state: &mut GameState, kills_before: u32) -> u32 {
    let steps = milestones_crossed(kills_before, state.kills, state.tuning.kill_threshold);
    for _ in 0..steps {
        state.difficulty.raise(&state.tuning);
    }
    if steps > 0 {
        log::info!(
            "Difficulty raised at {} kills: speed {:.3}, spawn every {} ms",
            state.kills,
            state.difficulty.enemy_speed,
            state.difficulty.spawn_interval_ms
        );
        state.push_event(GameEvent::DifficultyRaised {
            enemy_speed: state.difficulty.enemy_speed,
            spawn_interval_ms: state.difficulty.spawn_interval_ms,
        });
    }
    steps
}
