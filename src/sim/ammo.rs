//! Magazine and reload handling
//!
//! The reload delay itself is a scheduler timer owned by the session; this
//! module only flips the state on both ends of it.

use glam::Vec2;

use super::state::{GameEvent, GameState};

/// Result of a fire request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Not running, reloading, or out of ammo: nothing happened
    Rejected,
    /// A bullet left the barrel
    Fired { bullet_id: u32 },
    /// A bullet left the barrel and emptied the magazine; a reload must be scheduled
    Emptied { bullet_id: u32 },
}

impl FireOutcome {
    pub fn needs_reload(&self) -> bool {
        matches!(self, FireOutcome::Emptied { .. })
    }
}

pub fn can_fire(state: &GameState) -> bool {
    state.is_running() && state.ammo > 0 && !state.reloading
}

/// Fire one bullet from the ship's current position
pub fn fire(state: &mut GameState) -> FireOutcome {
    if !can_fire(state) {
        return FireOutcome::Rejected;
    }

    let pos = Vec2::new(state.player.x, state.tuning.bullet_start_y);
    let bullet_id = state.spawn_bullet(pos);
    state.ammo -= 1;
    state.push_event(GameEvent::ShotFired {
        bullet_id,
        ammo_left: state.ammo,
    });

    if state.ammo == 0 {
        state.reloading = true;
        state.push_event(GameEvent::ReloadStarted);
        FireOutcome::Emptied { bullet_id }
    } else {
        FireOutcome::Fired { bullet_id }
    }
}

/// Refill the magazine at the end of the reload window
pub fn finish_reload(state: &mut GameState) {
    if !state.reloading {
        return;
    }
    state.ammo = state.tuning.max_ammo;
    state.reloading = false;
    state.push_event(GameEvent::ReloadFinished);
}
