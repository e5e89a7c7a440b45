//! Collision detection between bullets, enemies and the ship
//!
//! Hits are box tests on each axis. Bullet/enemy resolution is a single pass
//! over scratch "spent" sets so an entity takes part in at most one hit per
//! tick; removal happens only after the pass.

use glam::Vec2;

use super::state::{Bullet, Enemy};

/// A confirmed bullet/enemy hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet_id: u32,
    pub enemy_id: u32,
}

/// True when `a` and `b` are closer than `dist` on both axes
#[inline]
pub fn overlaps(a: Vec2, b: Vec2, dist: f32) -> bool {
    let d = (a - b).abs();
    d.x < dist && d.y < dist
}

/// Pair bullets with enemies, remove every paired entity, return the hits.
///
/// Bullets are matched oldest first, each against the oldest unspent enemy
/// it overlaps.
pub fn resolve_hits(bullets: &mut Vec<Bullet>, enemies: &mut Vec<Enemy>, hit_distance: f32) -> Vec<Hit> {
    let mut spent_bullets = vec![false; bullets.len()];
    let mut spent_enemies = vec![false; enemies.len()];
    let mut hits = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let target = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !spent_enemies[*ei] && overlaps(bullet.pos, enemy.pos, hit_distance));

        if let Some((ei, enemy)) = target {
            spent_bullets[bi] = true;
            spent_enemies[ei] = true;
            hits.push(Hit {
                bullet_id: bullet.id,
                enemy_id: enemy.id,
            });
        }
    }

    if !hits.is_empty() {
        let mut i = 0;
        bullets.retain(|_| {
            let keep = !spent_bullets[i];
            i += 1;
            keep
        });
        let mut i = 0;
        enemies.retain(|_| {
            let keep = !spent_enemies[i];
            i += 1;
            keep
        });
    }

    hits
}

/// True when an enemy has reached the ship: past `danger_y` and horizontally
/// within `dist` of `player_x`
pub fn player_struck(player_x: f32, enemies: &[Enemy], danger_y: f32, dist: f32) -> bool {
    enemies
        .iter()
        .any(|e| e.pos.y > danger_y && (e.pos.x - player_x).abs() < dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn bullet(id: u32, x: f32, y: f32) -> Bullet {
        Bullet {
            id,
            pos: Vec2::new(x, y),
        }
    }

    fn enemy(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_close_pair_hits() {
        let mut bullets = vec![bullet(1, 0.5, 0.5)];
        let mut enemies = vec![enemy(2, 0.52, 0.52)];
        let hits = resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE);
        assert_eq!(
            hits,
            vec![Hit {
                bullet_id: 1,
                enemy_id: 2
            }]
        );
        assert!(bullets.is_empty());
        assert!(enemies.is_empty());
    }

    #[test]
    fn test_distant_pair_misses() {
        let mut bullets = vec![bullet(1, 0.5, 0.5)];
        let mut enemies = vec![enemy(2, 0.6, 0.6)];
        let hits = resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE);
        assert!(hits.is_empty());
        assert_eq!(bullets.len(), 1);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_one_axis_is_not_enough() {
        let mut bullets = vec![bullet(1, 0.5, 0.5)];
        let mut enemies = vec![enemy(2, 0.51, 0.7)];
        assert!(resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE).is_empty());
    }

    #[test]
    fn test_two_bullets_one_enemy_counts_once() {
        let mut bullets = vec![bullet(1, 0.5, 0.5), bullet(2, 0.51, 0.51)];
        let mut enemies = vec![enemy(3, 0.5, 0.52)];
        let hits = resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bullet_id, 1);
        // The second bullet survives to fly on
        assert_eq!(bullets, vec![bullet(2, 0.51, 0.51)]);
        assert!(enemies.is_empty());
    }

    #[test]
    fn test_one_bullet_two_enemies_counts_once() {
        let mut bullets = vec![bullet(1, 0.5, 0.5)];
        let mut enemies = vec![enemy(2, 0.49, 0.5), enemy(3, 0.51, 0.5)];
        let hits = resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].enemy_id, 2);
        assert_eq!(enemies, vec![enemy(3, 0.51, 0.5)]);
    }

    #[test]
    fn test_simultaneous_separate_hits() {
        let mut bullets = vec![bullet(1, 0.2, 0.5), bullet(2, 0.8, 0.3)];
        let mut enemies = vec![enemy(3, 0.8, 0.31), enemy(4, 0.21, 0.5), enemy(5, 0.5, 0.1)];
        let hits = resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE);
        assert_eq!(hits.len(), 2);
        assert!(bullets.is_empty());
        assert_eq!(enemies, vec![enemy(5, 0.5, 0.1)]);
    }

    #[test]
    fn test_player_struck() {
        let near_low = [enemy(1, 0.52, 0.95)];
        let near_high = [enemy(1, 0.52, 0.8)];
        let far_low = [enemy(1, 0.7, 0.95)];
        assert!(player_struck(0.5, &near_low, DANGER_Y, PLAYER_HIT_DISTANCE));
        assert!(!player_struck(0.5, &near_high, DANGER_Y, PLAYER_HIT_DISTANCE));
        assert!(!player_struck(0.5, &far_low, DANGER_Y, PLAYER_HIT_DISTANCE));
    }

    proptest! {
        #[test]
        fn prop_each_entity_used_at_most_once(
            bs in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0), 0..20),
            es in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0), 0..20),
        ) {
            let mut bullets: Vec<Bullet> = bs.iter().enumerate()
                .map(|(i, &(x, y))| bullet(i as u32, x, y)).collect();
            let mut enemies: Vec<Enemy> = es.iter().enumerate()
                .map(|(i, &(x, y))| enemy(1000 + i as u32, x, y)).collect();
            let (nb, ne) = (bullets.len(), enemies.len());

            let hits = resolve_hits(&mut bullets, &mut enemies, HIT_DISTANCE);

            let mut bullet_ids: Vec<u32> = hits.iter().map(|h| h.bullet_id).collect();
            let mut enemy_ids: Vec<u32> = hits.iter().map(|h| h.enemy_id).collect();
            bullet_ids.sort_unstable();
            bullet_ids.dedup();
            enemy_ids.sort_unstable();
            enemy_ids.dedup();
            prop_assert_eq!(bullet_ids.len(), hits.len());
            prop_assert_eq!(enemy_ids.len(), hits.len());
            prop_assert_eq!(bullets.len(), nb - hits.len());
            prop_assert_eq!(enemies.len(), ne - hits.len());
            for h in &hits {
                prop_assert!(bullets.iter().all(|b| b.id != h.bullet_id));
                prop_assert!(enemies.iter().all(|e| e.id != h.enemy_id));
            }
        }
    }
}
