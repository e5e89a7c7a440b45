//! Game session driver
//!
//! Owns the round state, the timer scheduler and the RNG. Hosts feed it
//! actions and elapsed wall-clock time and read back a [`Snapshot`]. Every
//! mutation happens inside one of these calls, so timer callbacks and input
//! never interleave.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Action;
use crate::sim::{
    Fired, GameEvent, GamePhase, GameState, Intent, Scheduler, TimerKind, apply_intent, autopilot,
    finish_reload, spawn_wave, tick,
};
use crate::tuning::Tuning;

/// Read-only view of a round for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Vec2,
    pub bullets: Vec<Vec2>,
    pub enemies: Vec<Vec2>,
    pub score: u64,
    pub kills: u32,
    pub ammo: u32,
    pub reloading: bool,
    pub enemy_speed: f32,
    pub spawn_interval_ms: u32,
}

/// One game session: a sequence of rounds sharing a seed and tuning
pub struct Game {
    state: GameState,
    scheduler: Scheduler,
    rng: Pcg32,
    seed: u64,
    autopilot: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            autopilot: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if self.autopilot != on {
            log::info!("Autopilot: {}", on);
        }
        self.autopilot = on;
    }

    /// Leave the intro screen. Ignored unless the game has not started yet.
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::NotStarted {
            log::debug!("Start ignored in {:?}", self.state.phase);
            return;
        }
        self.begin_round();
        log::info!("Game started (seed {})", self.seed);
    }

    /// Throw away the current round and begin a fresh one
    pub fn restart(&mut self) {
        self.begin_round();
        log::info!("Game restarted (epoch {})", self.state.epoch);
    }

    /// Cancel all timers (host is unmounting). State is left as is.
    pub fn stop(&mut self) {
        self.scheduler.cancel_all();
        log::info!("Game stopped");
    }

    fn begin_round(&mut self) {
        self.scheduler.cancel_all();
        let epoch = self.scheduler.begin_epoch();
        self.state.reset(epoch, GamePhase::Running);
        self.scheduler
            .schedule_every(TimerKind::Tick, self.state.tuning.tick_ms);
        self.scheduler
            .schedule_every(TimerKind::Spawn, self.state.difficulty.spawn_interval_ms);
    }

    /// Dispatch a host action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.apply(Intent::MoveLeft),
            Action::MoveRight => self.apply(Intent::MoveRight),
            Action::Fire => self.apply(Intent::Fire),
            Action::Start => match self.state.phase {
                GamePhase::NotStarted => self.start(),
                GamePhase::GameOver => self.restart(),
                GamePhase::Running => {}
            },
            Action::ToggleAutopilot => self.set_autopilot(!self.autopilot),
        }
    }

    /// Apply a player intent right away
    pub fn apply(&mut self, intent: Intent) {
        let outcome = apply_intent(&mut self.state, intent);
        if outcome.is_some_and(|o| o.needs_reload()) {
            self.scheduler
                .schedule_once(TimerKind::Reload, self.state.tuning.reload_ms);
        }
    }

    /// Advance virtual time by `elapsed_ms`, running every timer that comes
    /// due in order. Returns the number of simulation ticks run.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut ticks = 0;

        while let Some(fired) = self.scheduler.pop_due(until) {
            if !self.belongs_to_round(&fired) {
                log::debug!("Dropping stale {:?} timer from epoch {}", fired.kind, fired.epoch);
                continue;
            }
            match fired.kind {
                TimerKind::Tick => {
                    self.on_tick();
                    ticks += 1;
                }
                TimerKind::Spawn => {
                    spawn_wave(&mut self.state, &mut self.rng);
                }
                TimerKind::Reload => finish_reload(&mut self.state),
            }
        }

        self.scheduler.advance_to(until);
        ticks
    }

    fn belongs_to_round(&self, fired: &Fired) -> bool {
        self.scheduler.is_current(fired) && fired.epoch == self.state.epoch
    }

    fn on_tick(&mut self) {
        if self.autopilot {
            if let Some(intent) = autopilot(&self.state) {
                self.apply(intent);
            }
        }

        let report = tick(&mut self.state);

        if report.milestones > 0 {
            self.scheduler
                .set_period(TimerKind::Spawn, self.state.difficulty.spawn_interval_ms);
        }
        if report.game_over {
            self.scheduler.cancel_all();
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        Snapshot {
            phase: s.phase,
            player: s.player.pos(),
            bullets: s.bullets.iter().map(|b| b.pos).collect(),
            enemies: s.enemies.iter().map(|e| e.pos).collect(),
            score: s.score,
            kills: s.kills,
            ammo: s.ammo,
            reloading: s.reloading,
            enemy_speed: s.difficulty.enemy_speed,
            spawn_interval_ms: s.difficulty.spawn_interval_ms,
        }
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Mutable access to the round, for scripted setups and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
