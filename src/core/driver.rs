use std::ops::Range;

use tracing::{debug, trace};

use super::{
    event::DispatchEvent,
    state::{Process, ProcessState, Slot, Ticks, Workload},
    timeline::{Outcome, Timeline},
};
use crate::scheduler::{Policy, Scheduler};

/// Clock, arrival cursor and remaining-time scratch for one scheduler run.
///
/// Remaining times live here rather than on [`Process`], so every run starts
/// from a clean copy and runs never observe each other.
#[derive(Debug)]
pub struct RunState<'w> {
    workload: &'w Workload,
    now: Ticks,
    // First slot not yet admitted; slots are admitted in arrival order
    cursor: Slot,
    remaining: Vec<Ticks>,
    states: Vec<ProcessState>,
    unfinished: usize,
    timeline: Timeline,
}

impl<'w> RunState<'w> {
    pub fn new(workload: &'w Workload) -> Self {
        let len = workload.len();
        Self {
            workload,
            now: 0,
            cursor: 0,
            remaining: workload.iter().map(|p| p.burst_time).collect(),
            states: vec![ProcessState::Pending; len],
            unfinished: len,
            timeline: Timeline::with_capacity(len),
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn process(&self, slot: Slot) -> &'w Process {
        self.workload.process(slot)
    }

    pub fn remaining(&self, slot: Slot) -> Ticks {
        self.remaining[slot]
    }

    pub fn state(&self, slot: Slot) -> ProcessState {
        self.states[slot]
    }

    pub fn is_done(&self) -> bool {
        self.unfinished == 0
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.workload
            .processes()
            .get(self.cursor)
            .map(|p| p.arrival_time)
    }

    /// Admits every pending process with `arrival_time <= horizon` and
    /// returns the admitted slots, in arrival order.
    pub fn admit_until(&mut self, horizon: Ticks) -> Range<Slot> {
        let start = self.cursor;
        let arriving = self.workload.processes()[start..]
            .iter()
            .take_while(|p| p.arrival_time <= horizon) // Contiguous, since the workload is sorted
            .count();

        for slot in start..start + arriving {
            debug_assert_eq!(self.states[slot], ProcessState::Pending);
            self.remaining[slot] = self.process(slot).burst_time;
            self.states[slot] = ProcessState::Ready;
            trace!(now = self.now, pid = self.process(slot).id, slot, "admitted");
        }

        self.cursor += arriving;
        start..self.cursor
    }

    /// Idles the CPU until the next pending arrival.
    pub fn fast_forward(&mut self) {
        if let Some(next) = self.next_arrival() {
            debug_assert!(next >= self.now, "Arrival {next} is behind the clock");
            trace!(from = self.now, to = next, "cpu idle, fast-forwarding");
            self.now = next;
        }
    }

    pub fn wait_until(&mut self, at: Ticks) {
        self.now = self.now.max(at);
    }

    /// Runs `slot` for `min(remaining, budget)` ticks and returns whether it completed.
    pub fn run(&mut self, slot: Slot, budget: Ticks) -> bool {
        debug_assert_eq!(
            self.states[slot],
            ProcessState::Ready,
            "Slot {slot} dispatched while not ready"
        );

        let process = self.process(slot);
        let ran_for = self.remaining[slot].min(budget);
        self.timeline.dispatch(DispatchEvent {
            at: self.now,
            pid: process.id,
            slot,
            ran_for,
        });
        debug!(now = self.now, pid = process.id, ran_for, "dispatch");

        self.now += ran_for;
        self.remaining[slot] -= ran_for;

        if self.remaining[slot] > 0 {
            return false;
        }

        self.states[slot] = ProcessState::Completed;
        self.unfinished -= 1;
        self.timeline.complete(process, self.now);
        true
    }

    pub fn finish(self, policy: Policy) -> Outcome {
        debug_assert!(self.is_done(), "Run finished with unfinished processes");
        self.timeline.finish(policy)
    }
}

/// Replays `workload` through `scheduler` until every process has completed.
pub fn simulate<S: Scheduler>(workload: &Workload, scheduler: &mut S) -> Outcome {
    let mut run = RunState::new(workload);

    while !run.is_done() {
        let horizon = scheduler.admission_horizon(run.now());
        for slot in run.admit_until(horizon) {
            scheduler.enqueue(&run, slot);
        }

        match scheduler.pick_next(&run) {
            Some(slot) => {
                // Look-ahead admission can hand out a process before it arrives
                run.wait_until(run.process(slot).arrival_time);
                let budget = scheduler.slice(&run, slot);
                if run.run(slot, budget) {
                    scheduler.completed(&run, slot);
                } else {
                    scheduler.requeue(&run, slot);
                }
            }
            None => run.fast_forward(),
        }
    }

    run.finish(scheduler.policy())
}
