//! Fixed timestep simulation tick
//!
//! One tick: move and prune bullets and enemies, resolve hits, raise
//! difficulty on kill milestones, then check whether an enemy reached the ship.

use super::collision::{player_struck, resolve_hits};
use super::difficulty;
use super::state::{Bullet, Enemy, GameEvent, GamePhase, GameState};
use crate::consts::{BULLET_PRUNE_Y, ENEMY_ESCAPE_Y};

/// What a tick changed, for the session driver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub kills: u32,
    pub escaped: u32,
    /// Difficulty milestones reached this tick
    pub milestones: u32,
    pub game_over: bool,
}

/// Move bullets up by `speed` and drop those past the top edge
pub fn advance_bullets(bullets: &mut Vec<Bullet>, speed: f32) {
    for bullet in bullets.iter_mut() {
        bullet.pos.y -= speed;
    }
    bullets.retain(|b| b.pos.y > BULLET_PRUNE_Y);
}

/// Move enemies down by `speed` and drop those past the bottom edge.
/// Returns the ids of escaped enemies.
pub fn advance_enemies(enemies: &mut Vec<Enemy>, speed: f32) -> Vec<u32> {
    for enemy in enemies.iter_mut() {
        enemy.pos.y += speed;
    }
    let mut escaped = Vec::new();
    enemies.retain(|e| {
        let keep = e.pos.y < ENEMY_ESCAPE_Y;
        if !keep {
            escaped.push(e.id);
        }
        keep
    });
    escaped
}

/// Advance the round by one tick. Does nothing unless running.
pub fn tick(state: &mut GameState) -> TickReport {
    let mut report = TickReport::default();
    if !state.is_running() {
        return report;
    }

    state.time_ticks += 1;

    // Motion then prune
    advance_bullets(&mut state.bullets, state.tuning.bullet_speed);
    let escaped = advance_enemies(&mut state.enemies, state.difficulty.enemy_speed);
    report.escaped = escaped.len() as u32;
    for enemy_id in escaped {
        state.push_event(GameEvent::EnemyEscaped { enemy_id });
    }

    // Hits against post-motion positions
    let hits = resolve_hits(&mut state.bullets, &mut state.enemies, state.tuning.hit_distance);
    let kills_before = state.kills;
    for hit in &hits {
        state.score += 1;
        state.kills += 1;
        state.push_event(GameEvent::EnemyKilled {
            enemy_id: hit.enemy_id,
            bullet_id: hit.bullet_id,
        });
    }
    report.kills = hits.len() as u32;
    report.milestones = difficulty::apply_kills(state, kills_before);

    if player_struck(
        state.player.x,
        &state.enemies,
        state.tuning.danger_y,
        state.tuning.player_hit_distance,
    ) {
        state.phase = GamePhase::GameOver;
        // The reload timer dies with the round
        state.reloading = false;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over at tick {}: score {}, kills {}",
            state.time_ticks,
            state.score,
            state.kills
        );
        report.game_over = true;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_motion_per_tick() {
        let mut state = running();
        state.spawn_bullet(Vec2::new(0.2, 0.9));
        state.spawn_enemy(Vec2::new(0.8, 0.1));
        tick(&mut state);
        assert!((state.bullets[0].pos.y - 0.88).abs() < 1e-6);
        assert!((state.enemies[0].pos.y - 0.105).abs() < 1e-6);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_out_of_range_entities_pruned() {
        let mut state = running();
        state.spawn_bullet(Vec2::new(0.2, -0.085));
        state.spawn_enemy(Vec2::new(0.2, 0.998));
        let report = tick(&mut state);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(report.escaped, 1);
        assert!(!report.game_over);
    }

    #[test]
    fn test_hit_scores_and_removes() {
        let mut state = running();
        // Both land on (0.5, 0.5) and (0.52, 0.52) after motion
        state.spawn_bullet(Vec2::new(0.5, 0.52));
        state.spawn_enemy(Vec2::new(0.52, 0.515));
        let report = tick(&mut state);
        assert_eq!(report.kills, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.kills, 1);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_fifth_kill_raises_difficulty() {
        let mut state = running();
        state.kills = 4;
        state.score = 4;
        state.spawn_bullet(Vec2::new(0.3, 0.4));
        state.spawn_enemy(Vec2::new(0.3, 0.38));
        let report = tick(&mut state);
        assert_eq!(report.milestones, 1);
        assert_eq!(state.difficulty.spawn_interval_ms, 1800);
    }

    #[test]
    fn test_enemy_reaching_ship_ends_round() {
        let mut state = running();
        state.spawn_enemy(Vec2::new(0.52, 0.95));
        let report = tick(&mut state);
        assert!(report.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_game_over_mid_reload_clears_reloading() {
        let mut state = running();
        state.ammo = 0;
        state.reloading = true;
        state.spawn_enemy(Vec2::new(0.5, 0.95));
        assert!(tick(&mut state).game_over);
        assert!(!state.reloading);
        assert_eq!(state.ammo, 0);
    }

    #[test]
    fn test_enemy_above_danger_line_is_safe() {
        let mut state = running();
        state.spawn_enemy(Vec2::new(0.52, 0.8));
        let report = tick(&mut state);
        assert!(!report.game_over);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_danger_line_follows_tuning() {
        let mut state = running();
        state.tuning.danger_y = 0.75;
        state.spawn_enemy(Vec2::new(0.52, 0.8));
        assert!(tick(&mut state).game_over);
    }

    #[test]
    fn test_tick_frozen_outside_running() {
        let mut state = GameState::new(Tuning::default());
        state.spawn_enemy(Vec2::new(0.5, 0.5));
        assert_eq!(tick(&mut state), TickReport::default());
        assert_eq!(state.enemies[0].pos.y, 0.5);

        state.phase = GamePhase::GameOver;
        tick(&mut state);
        assert_eq!(state.enemies[0].pos.y, 0.5);
        assert_eq!(state.time_ticks, 0);
    }

    proptest! {
        #[test]
        fn prop_motion_exact_and_pruned(
            bullet_ys in prop::collection::vec(-0.1f32..0.9, 0..16),
            enemy_ys in prop::collection::vec(0.0f32..1.0, 0..16),
            speed in 0.005f32..0.02,
        ) {
            let mut bullets: Vec<Bullet> = bullet_ys.iter().enumerate()
                .map(|(i, &y)| Bullet { id: i as u32, pos: Vec2::new(0.5, y) }).collect();
            let mut enemies: Vec<Enemy> = enemy_ys.iter().enumerate()
                .map(|(i, &y)| Enemy { id: i as u32, pos: Vec2::new(0.5, y) }).collect();
            let before_b = bullets.clone();
            let before_e = enemies.clone();

            advance_bullets(&mut bullets, 0.02);
            let escaped = advance_enemies(&mut enemies, speed);

            for b in &bullets {
                prop_assert!(b.pos.y > BULLET_PRUNE_Y);
                let old = before_b.iter().find(|o| o.id == b.id).unwrap();
                prop_assert_eq!(b.pos.y, old.pos.y - 0.02);
            }
            for e in &enemies {
                prop_assert!(e.pos.y < ENEMY_ESCAPE_Y);
                let old = before_e.iter().find(|o| o.id == e.id).unwrap();
                prop_assert_eq!(e.pos.y, old.pos.y + speed);
            }
            prop_assert_eq!(enemies.len() + escaped.len(), before_e.len());
        }
    }
}
