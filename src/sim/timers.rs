//! Timers on the simulation clock
//!
//! Delayed transitions are tokens with a due time that the tick driver polls,
//! never callbacks. Repeating timers drive the spawner.

use serde::{Deserialize, Serialize};

use crate::millis_to_micros;

/// Delayed transition payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Show "N lives remaining - tap to proceed"
    ShowRespawnPrompt,
    /// Emit the victory summary
    FinalizeVictory,
    /// Emit the defeat summary after the last life was lost
    FinalizeDefeat,
}

/// A one-shot event waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub due_us: u64,
    pub event: TimerEvent,
}

/// Pending one-shot events, fired in due order (ties keep scheduling order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<ScheduledEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_us: u64, delay_ms: u64, event: TimerEvent) {
        let due_us = now_us + millis_to_micros(delay_ms);
        // Stable insert keeps same-due events in scheduling order
        let pos = self.pending.partition_point(|e| e.due_us <= due_us);
        self.pending.insert(pos, ScheduledEvent { due_us, event });
    }

    /// Remove and return every event due at or before `now_us`
    pub fn take_due(&mut self, now_us: u64) -> Vec<TimerEvent> {
        let due = self.pending.partition_point(|e| e.due_us <= now_us);
        self.pending.drain(..due).map(|e| e.event).collect()
    }

    pub fn is_pending(&self, event: TimerEvent) -> bool {
        self.pending.iter().any(|e| e.event == event)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// A looping timer that fires every `interval_us`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    pub interval_us: u64,
    elapsed_us: u64,
}

impl RepeatingTimer {
    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval_us: millis_to_micros(interval_ms).max(1),
            elapsed_us: 0,
        }
    }

    /// Advance by `dt_us`, returning how many times the timer fired
    pub fn advance(&mut self, dt_us: u64) -> u32 {
        self.elapsed_us += dt_us;
        let mut fired = 0;
        while self.elapsed_us >= self.interval_us {
            self.elapsed_us -= self.interval_us;
            fired += 1;
        }
        fired
    }

    /// Restart the cycle from zero
    pub fn reset(&mut self) {
        self.elapsed_us = 0;
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }
}
