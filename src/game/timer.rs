//! One-shot delayed calls
//!
//! Runs on frame time, not on the physics clock: a paused world still
//! counts down. Fired actions are handed back to the caller in the order
//! they were scheduled, and the caller applies them to the world.

use super::entity::Entity;

/// What to do when a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    RemoveText(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    remaining_ms: f32,
    action: TimerAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delayed_call(&mut self, delay_ms: u32, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            remaining_ms: delay_ms as f32,
            action,
        });
        handle
    }

    /// Count every timer down by `dt_ms` and return the ones that elapsed.
    pub fn advance(&mut self, dt_ms: f32) -> Vec<TimerAction> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|timer| {
            timer.remaining_ms -= dt_ms;
            if timer.remaining_ms <= 0.0 {
                fired.push(timer.action);
                false
            } else {
                true
            }
        });
        fired
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    pub fn remaining_ms(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| timer.remaining_ms)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
