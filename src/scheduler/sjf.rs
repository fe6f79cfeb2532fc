use std::{cmp::Ordering, collections::VecDeque};

use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::{Policy, RunState, SEED_PREDICTION, Scheduler, Slot, Ticks};
use crate::core::{Outcome, ProcessId, Result, Workload, simulate};

/// Heap priority for SJF: smallest predicted burst first, then lower id.
#[derive(Debug, Clone, Copy)]
pub struct PredictedBurst {
    pub burst: f64,
    pub pid: ProcessId,
}

// Reversed for the max-heap; total_cmp keeps the order total over f64
impl Ord for PredictedBurst {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .burst
            .total_cmp(&self.burst)
            .then_with(|| other.pid.cmp(&self.pid))
    }
}

impl PartialOrd for PredictedBurst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PredictedBurst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PredictedBurst {}

/// One exponential-average step, taken when an instance of `pid` completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionUpdate {
    pub at: Ticks,
    pub pid: ProcessId,
    pub actual: Ticks,
    pub previous: f64,
    pub predicted: f64,
}

/// Non-preemptive shortest-job-first driven by predicted bursts.
///
/// Processes sharing an id are instances of one recurring job. Each id keeps
/// a FIFO of ready instances and a burst estimate seeded at
/// [`SEED_PREDICTION`]; after every completion the estimate moves to
/// `alpha * estimate + (1 - alpha) * actual`.
#[derive(Debug)]
pub struct SjfScheduler {
    alpha: f64,
    ready: FxHashMap<ProcessId, VecDeque<Slot>>,
    predicted: FxHashMap<ProcessId, f64>,
    // Ids with at least one ready instance
    eligible: KeyedPriorityQueue<ProcessId, PredictedBurst>,
    updates: Vec<PredictionUpdate>,
}

impl SjfScheduler {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ready: FxHashMap::default(),
            predicted: FxHashMap::default(),
            eligible: KeyedPriorityQueue::new(),
            updates: Vec::new(),
        }
    }

    pub fn predicted(&self, pid: ProcessId) -> Option<f64> {
        self.predicted.get(&pid).copied()
    }

    pub fn into_updates(self) -> Vec<PredictionUpdate> {
        self.updates
    }

    fn mark_eligible(&mut self, pid: ProcessId) {
        let burst = self.predicted(pid).unwrap_or(SEED_PREDICTION);
        self.eligible.push(pid, PredictedBurst { burst, pid });
    }
}

impl Scheduler for SjfScheduler {
    fn policy(&self) -> Policy {
        Policy::Sjf { alpha: self.alpha }
    }

    fn enqueue(&mut self, run: &RunState, slot: Slot) {
        let pid = run.process(slot).id;
        self.predicted.entry(pid).or_insert(SEED_PREDICTION);
        self.ready.entry(pid).or_default().push_back(slot);

        if self.eligible.get_priority(&pid).is_none() {
            self.mark_eligible(pid);
        }
    }

    fn pick_next(&mut self, _run: &RunState) -> Option<Slot> {
        let (pid, _) = self.eligible.pop()?;
        let slot = self.ready.get_mut(&pid).and_then(VecDeque::pop_front);
        debug_assert!(slot.is_some(), "Eligible id {pid} has no ready instance");
        slot
    }

    fn completed(&mut self, run: &RunState, slot: Slot) {
        let process = run.process(slot);
        let estimate = self.predicted.entry(process.id).or_insert(SEED_PREDICTION);
        let previous = *estimate;
        *estimate = self.alpha * previous + (1.0 - self.alpha) * process.burst_time as f64;

        let update = PredictionUpdate {
            at: run.now(),
            pid: process.id,
            actual: process.burst_time,
            previous,
            predicted: *estimate,
        };
        debug!(
            pid = update.pid,
            actual = update.actual,
            previous = update.previous,
            predicted = update.predicted,
            "burst prediction updated"
        );
        self.updates.push(update);

        if self.ready.get(&process.id).is_some_and(|q| !q.is_empty()) {
            self.mark_eligible(process.id);
        }
    }
}

/// Runs SJF and also returns every prediction update, in completion order.
pub fn run_with_predictions(
    workload: &Workload,
    alpha: f64,
) -> Result<(Outcome, Vec<PredictionUpdate>)> {
    Policy::Sjf { alpha }.validate()?;
    let mut scheduler = SjfScheduler::new(alpha);
    let outcome = simulate(workload, &mut scheduler);
    Ok((outcome, scheduler.into_updates()))
}
