use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{Policy, RunState, Scheduler, Slot, Ticks};
use crate::core::ProcessId;

/// Heap priority for SRTF: shortest remaining time first, then lower process
/// id, then earlier slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestRemaining {
    pub remaining: Ticks,
    pub pid: ProcessId,
    pub slot: Slot,
}

// KeyedPriorityQueue is a max-heap, so the natural order is reversed
impl Ord for ShortestRemaining {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.remaining, other.pid, other.slot).cmp(&(self.remaining, self.pid, self.slot))
    }
}

impl PartialOrd for ShortestRemaining {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Preemptive shortest-remaining-time-first.
///
/// Every segment ends no later than the next arrival, so each arrival instant
/// is a decision point and the CPU always holds the shortest ready process.
#[derive(Debug)]
pub struct SrtfScheduler {
    ready: KeyedPriorityQueue<Slot, ShortestRemaining>,
}

impl SrtfScheduler {
    pub fn new() -> Self {
        Self {
            ready: KeyedPriorityQueue::new(),
        }
    }
}

impl Scheduler for SrtfScheduler {
    fn policy(&self) -> Policy {
        Policy::Srtf
    }

    fn enqueue(&mut self, run: &RunState, slot: Slot) {
        let priority = ShortestRemaining {
            remaining: run.remaining(slot),
            pid: run.process(slot).id,
            slot,
        };
        let previous = self.ready.push(slot, priority);
        debug_assert!(previous.is_none(), "Slot {slot} queued twice");
    }

    fn pick_next(&mut self, _run: &RunState) -> Option<Slot> {
        let (slot, picked) = self.ready.pop()?;
        if let Some((_, runner_up)) = self.ready.peek() {
            debug_assert!(
                picked.remaining <= runner_up.remaining,
                "Picked {} with {} remaining over {} with {}",
                picked.pid,
                picked.remaining,
                runner_up.pid,
                runner_up.remaining
            );
        }
        Some(slot)
    }

    fn slice(&self, run: &RunState, _slot: Slot) -> Ticks {
        match run.next_arrival() {
            Some(arrival) => arrival - run.now(),
            None => Ticks::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Process, Workload};

    fn textbook() -> Workload {
        Workload::new(vec![
            Process::new(0, 0, 8),
            Process::new(1, 1, 4),
            Process::new(2, 2, 9),
            Process::new(3, 3, 5),
        ])
        .unwrap()
    }

    #[test]
    fn heap_order_prefers_short_then_low_id() {
        let mut queue = KeyedPriorityQueue::new();
        queue.push(0, ShortestRemaining { remaining: 4, pid: 9, slot: 0 });
        queue.push(1, ShortestRemaining { remaining: 2, pid: 5, slot: 1 });
        queue.push(2, ShortestRemaining { remaining: 4, pid: 3, slot: 2 });
        queue.push(3, ShortestRemaining { remaining: 2, pid: 5, slot: 3 });

        let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|(slot, _)| slot)).collect();
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn shorter_arrival_preempts() {
        let outcome = Policy::Srtf.run(&textbook()).unwrap();

        assert_eq!(
            outcome.pairs(),
            vec![(0, 0), (1, 1), (2, 1), (3, 1), (5, 3), (10, 0), (17, 2)]
        );
        // 1 done at 5, 3 at 10, 0 at 17, 2 at 26
        assert_eq!(outcome.total_wait, 26);
        assert_eq!(outcome.average_wait(), 6.5);
    }

    #[test]
    fn simultaneous_arrivals_are_admitted_together() {
        let workload = Workload::new(vec![
            Process::new(0, 0, 6),
            Process::new(1, 0, 2),
            Process::new(2, 0, 4),
        ])
        .unwrap();

        let outcome = Policy::Srtf.run(&workload).unwrap();
        assert_eq!(outcome.pairs(), vec![(0, 1), (2, 2), (6, 0)]);
        assert!(outcome.schedule.iter().all(|e| e.ran_for > 0));
    }

    #[test]
    fn ties_go_to_lower_id() {
        let workload = Workload::new(vec![Process::new(4, 0, 3), Process::new(2, 0, 3)]).unwrap();

        let outcome = Policy::Srtf.run(&workload).unwrap();
        assert_eq!(outcome.pairs(), vec![(0, 2), (3, 4)]);
    }

    #[test]
    fn longer_arrival_does_not_preempt() {
        let workload = Workload::new(vec![Process::new(0, 0, 3), Process::new(1, 1, 5)]).unwrap();

        let outcome = Policy::Srtf.run(&workload).unwrap();
        // 0 is re-dispatched at the arrival instant of 1 and keeps the CPU
        assert_eq!(outcome.pairs(), vec![(0, 0), (1, 0), (3, 1)]);
        assert_eq!(outcome.total_wait, 2);
    }
}
