//! Virtual-time timer scheduler
//!
//! Replaces browser `setInterval`/`setTimeout` with an explicit queue over
//! simulated milliseconds. The host advances time; due timers come back one
//! at a time in due order, each tagged with the epoch it was armed in.

/// Which callback a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Simulation clock
    Tick,
    /// Enemy spawner
    Spawn,
    /// One-shot magazine refill
    Reload,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    due_ms: u64,
    /// `Some` for periodic timers
    period_ms: Option<u32>,
    epoch: u64,
    /// Insertion order, breaks ties between timers due at the same instant
    seq: u64,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub kind: TimerKind,
    pub epoch: u64,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    epoch: u64,
    next_seq: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a new epoch. Timers from older epochs are not removed here;
    /// callers either cancel them or discard them via [`Scheduler::is_current`].
    pub fn begin_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub fn is_current(&self, fired: &Fired) -> bool {
        fired.epoch == self.epoch
    }

    /// Arm a periodic timer; the first firing is one period from now
    pub fn schedule_every(&mut self, kind: TimerKind, period_ms: u32) {
        self.push(kind, period_ms, Some(period_ms.max(1)));
    }

    /// Arm a one-shot timer
    pub fn schedule_once(&mut self, kind: TimerKind, delay_ms: u32) {
        self.push(kind, delay_ms, None);
    }

    fn push(&mut self, kind: TimerKind, delay_ms: u32, period_ms: Option<u32>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms as u64),
            period_ms,
            epoch: self.epoch,
            seq,
        });
    }

    /// Change the period of a periodic timer. The pending firing keeps its
    /// due time; the new period applies from the next re-arm.
    pub fn set_period(&mut self, kind: TimerKind, period_ms: u32) {
        for timer in self.timers.iter_mut().filter(|t| t.kind == kind) {
            if timer.period_ms.is_some() {
                timer.period_ms = Some(period_ms.max(1));
            }
        }
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Periodic timers are re-armed, one-shots removed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        let timer = &self.timers[idx];
        let fired = Fired {
            kind: timer.kind,
            epoch: timer.epoch,
            at_ms: timer.due_ms,
        };
        let period_ms = timer.period_ms;
        self.now_ms = self.now_ms.max(fired.at_ms);

        match period_ms {
            Some(period) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let timer = &mut self.timers[idx];
                timer.due_ms = timer.due_ms.saturating_add(period as u64);
                timer.seq = seq;
            }
            None => {
                self.timers.remove(idx);
            }
        }

        Some(fired)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}
