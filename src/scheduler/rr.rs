use std::collections::VecDeque;

use super::{Policy, RunState, Scheduler, Slot, Ticks};

/// Cyclic time slicing with a fixed quantum.
///
/// Admission looks one quantum ahead: anything arriving while the next slice
/// runs is already queued for the decision after it. A process handed out
/// before its arrival simply delays the clock until it arrives.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    ready: VecDeque<Slot>,
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Self {
        assert!(quantum > 0, "Round-robin requires a positive quantum");
        Self {
            ready: VecDeque::new(),
            quantum,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn policy(&self) -> Policy {
        Policy::RoundRobin {
            quantum: self.quantum,
        }
    }

    fn admission_horizon(&self, now: Ticks) -> Ticks {
        now.saturating_add(self.quantum)
    }

    fn enqueue(&mut self, _run: &RunState, slot: Slot) {
        self.ready.push_back(slot);
    }

    fn pick_next(&mut self, _run: &RunState) -> Option<Slot> {
        self.ready.pop_front()
    }

    fn slice(&self, _run: &RunState, _slot: Slot) -> Ticks {
        self.quantum
    }
}
