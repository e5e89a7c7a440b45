//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`], so restarting a round is
//! a single struct replacement.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::consts::PLAYER_Y;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro screen, nothing ticks
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal position, kept within the tuning bounds
    pub x: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_start_x,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, PLAYER_Y)
    }

    /// Move one step left (`dir < 0`) or right (`dir > 0`), clamped to the playfield.
    /// A zero or NaN direction leaves the ship where it is.
    pub fn step(&mut self, dir: f32, tuning: &Tuning) {
        if dir == 0.0 || dir.is_nan() {
            return;
        }
        let target = self.x + dir.signum() * tuning.player_step;
        self.x = target.clamp(tuning.player_min_x, tuning.player_max_x);
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
}

/// A descending invader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
}

/// Things that happened during simulation, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { bullet_id: u32, ammo_left: u32 },
    ReloadStarted,
    ReloadFinished,
    WaveSpawned { count: u32 },
    EnemyKilled { enemy_id: u32, bullet_id: u32 },
    EnemyEscaped { enemy_id: u32 },
    DifficultyRaised { enemy_speed: f32, spawn_interval_ms: u32 },
    GameOver { score: u64 },
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session epoch; timers armed in another epoch must not touch this state
    pub epoch: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Live enemies, oldest first
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// Cumulative kills, drives difficulty and batch size
    pub kills: u32,
    pub ammo: u32,
    pub reloading: bool,
    pub difficulty: Difficulty,
    /// Simulation ticks since the round began
    pub time_ticks: u64,
    pub tuning: Tuning,
    /// Events since the last drain (not part of the round's identity)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            epoch: 0,
            phase: GamePhase::NotStarted,
            player: Player::new(&tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            kills: 0,
            ammo: tuning.max_ammo,
            reloading: false,
            difficulty: Difficulty::initial(&tuning),
            time_ticks: 0,
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace the round with a fresh one in the given epoch and phase.
    /// Tuning is carried over; pending events are kept for the host.
    pub fn reset(&mut self, epoch: u64, phase: GamePhase) {
        let events = std::mem::take(&mut self.events);
        let mut fresh = Self::new(self.tuning.clone());
        fresh.epoch = epoch;
        fresh.phase = phase;
        fresh.events = events;
        *self = fresh;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add a bullet at the given position (bypasses ammo rules)
    pub fn spawn_bullet(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet { id, pos });
        id
    }

    /// Add an enemy at the given position
    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos });
        id
    }
}
