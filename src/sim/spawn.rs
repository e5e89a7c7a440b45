//! Enemy batch spawning

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Enemies per spawn: one more for every `threshold` kills, capped at `max_batch`
pub fn batch_size(kills: u32, threshold: u32, max_batch: u32) -> u32 {
    let extra = kills.checked_div(threshold).unwrap_or(0);
    extra.saturating_add(1).min(max_batch)
}

/// Random spawn column, always inside the spawn band
fn spawn_x(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    let (min_x, max_x) = (tuning.enemy_spawn_min_x, tuning.enemy_spawn_max_x);
    let x: f32 = rng.random_range(min_x..=max_x);
    if x.is_finite() {
        x.clamp(min_x, max_x)
    } else {
        (min_x + max_x) / 2.0
    }
}

/// Drop a batch of enemies along the top edge. Returns how many spawned.
pub fn spawn_wave(state: &mut GameState, rng: &mut impl Rng) -> u32 {
    if !state.is_running() {
        return 0;
    }

    let count = batch_size(state.kills, state.tuning.kill_threshold, state.tuning.max_spawn_batch);
    for _ in 0..count {
        let x = spawn_x(rng, &state.tuning);
        state.spawn_enemy(Vec2::new(x, 0.0));
    }

    log::debug!("Spawned {} enemies ({} live)", count, state.enemies.len());
    state.push_event(GameEvent::WaveSpawned { count });
    count
}
