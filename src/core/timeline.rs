use super::{
    event::DispatchEvent,
    state::{Process, ProcessId, Slot, Ticks},
};
use crate::scheduler::Policy;

/// Dispatch log and waiting-time accumulator for a single scheduler run.
#[derive(Debug, Default)]
pub struct Timeline {
    events: Vec<DispatchEvent>,
    total_wait: Ticks,
    completed: usize,
}

impl Timeline {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            total_wait: 0,
            completed: 0,
        }
    }

    pub fn dispatch(&mut self, event: DispatchEvent) {
        if let Some(last) = self.events.last() {
            debug_assert!(
                last.end() <= event.at,
                "Dispatch of {} at {} overlaps segment of {} ending at {}",
                event.pid,
                event.at,
                last.pid,
                last.end()
            );
        }
        debug_assert!(event.ran_for > 0, "Zero-length dispatch of {}", event.pid);
        self.events.push(event);
    }

    pub fn complete(&mut self, process: &Process, completion_time: Ticks) {
        let service = process.arrival_time + process.burst_time;
        debug_assert!(
            completion_time >= service,
            "Process {} completed at {} before arrival + burst = {}",
            process.id,
            completion_time,
            service
        );
        self.total_wait += completion_time.saturating_sub(service);
        self.completed += 1;
    }

    pub fn events(&self) -> &[DispatchEvent] {
        &self.events
    }

    pub fn total_wait(&self) -> Ticks {
        self.total_wait
    }

    pub fn finish(self, policy: Policy) -> Outcome {
        Outcome {
            policy,
            schedule: self.events,
            total_wait: self.total_wait,
            processes: self.completed,
        }
    }
}

/// Result of replaying a workload under one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub policy: Policy,
    pub schedule: Vec<DispatchEvent>,
    pub total_wait: Ticks,
    pub processes: usize,
}

impl Outcome {
    pub fn average_wait(&self) -> f64 {
        // Workloads are never empty, so `processes` is at least one
        self.total_wait as f64 / self.processes as f64
    }

    pub fn pairs(&self) -> Vec<(Ticks, ProcessId)> {
        self.schedule.iter().map(DispatchEvent::pair).collect()
    }

    pub fn segments(&self, slot: Slot) -> impl Iterator<Item = &DispatchEvent> {
        self.schedule.iter().filter(move |e| e.slot == slot)
    }

    /// Completion time of the process in `slot`, i.e. the end of its last segment.
    pub fn completion_time(&self, slot: Slot) -> Option<Ticks> {
        self.segments(slot).last().map(DispatchEvent::end)
    }
}
