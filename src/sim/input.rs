//! Player intents and the idle-mode autopilot

use super::ammo::{self, FireOutcome};
use super::state::{Enemy, GameState};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Apply one intent to a running round.
///
/// Moves are clamped to the playfield; fire goes through the magazine rules.
/// Anything outside `Running` is ignored. Returns the fire outcome for
/// `Intent::Fire`, `None` otherwise.
pub fn apply_intent(state: &mut GameState, intent: Intent) -> Option<FireOutcome> {
    if !state.is_running() {
        return None;
    }

    match intent {
        Intent::MoveLeft => {
            state.player.step(-1.0, &state.tuning);
            None
        }
        Intent::MoveRight => {
            state.player.step(1.0, &state.tuning);
            None
        }
        Intent::Fire => Some(ammo::fire(state)),
    }
}

/// How far above the danger line the autopilot starts dodging
const DODGE_MARGIN: f32 = 0.15;

/// Pick the next intent for idle/demo play.
///
/// Dodges any enemy about to reach the ship, otherwise lines up under the
/// lowest enemy and fires when aligned.
pub fn autopilot(state: &GameState) -> Option<Intent> {
    if !state.is_running() {
        return None;
    }

    let player_x = state.player.x;
    let watch_y = state.tuning.danger_y - DODGE_MARGIN;
    let reach = state.tuning.player_hit_distance * 2.0;

    let threat = state
        .enemies
        .iter()
        .filter(|e| e.pos.y > watch_y && (e.pos.x - player_x).abs() < reach)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(threat) = threat {
        let go_left = if threat.pos.x >= player_x {
            player_x - state.tuning.player_step >= state.tuning.player_min_x
        } else {
            player_x + state.tuning.player_step > state.tuning.player_max_x
        };
        return Some(if go_left { Intent::MoveLeft } else { Intent::MoveRight });
    }

    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.y < watch_y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    aim_at(state, target)
}

fn aim_at(state: &GameState, target: &Enemy) -> Option<Intent> {
    let dx = target.pos.x - state.player.x;
    if dx.abs() < state.tuning.hit_distance {
        ammo::can_fire(state).then_some(Intent::Fire)
    } else if dx < 0.0 {
        Some(Intent::MoveLeft)
    } else {
        Some(Intent::MoveRight)
    }
}
