use std::collections::VecDeque;

use super::{Policy, RunState, Scheduler, Slot};

/// Non-preemptive, arrival order.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    ready: VecDeque<Slot>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn enqueue(&mut self, _run: &RunState, slot: Slot) {
        self.ready.push_back(slot);
    }

    fn pick_next(&mut self, _run: &RunState) -> Option<Slot> {
        self.ready.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Process, Workload};
    use crate::scheduler::Policy;

    #[test]
    fn textbook_workload() {
        let workload = Workload::new(vec![
            Process::new(0, 0, 8),
            Process::new(1, 1, 4),
            Process::new(2, 2, 9),
            Process::new(3, 3, 5),
        ])
        .unwrap();

        let outcome = Policy::Fcfs.run(&workload).unwrap();
        assert_eq!(outcome.pairs(), vec![(0, 0), (8, 1), (12, 2), (21, 3)]);
        assert_eq!(outcome.total_wait, 35);
        assert_eq!(outcome.average_wait(), 8.75);
    }

    #[test]
    fn idle_gaps_advance_the_clock() {
        let workload = Workload::new(vec![
            Process::new(1, 2, 3),
            Process::new(2, 10, 1),
            Process::new(3, 10, 2),
        ])
        .unwrap();

        let outcome = Policy::Fcfs.run(&workload).unwrap();
        assert_eq!(outcome.pairs(), vec![(2, 1), (10, 2), (11, 3)]);
        assert_eq!(outcome.total_wait, 1);
    }
}
