use std::fmt;

use super::error::{Result, SimError};

pub type Ticks = u64;
pub type ProcessId = u64;
// Index into a Workload's arrival-sorted process list
pub type Slot = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[id {} : arrival_time {},  burst_time {}]",
            self.id, self.arrival_time, self.burst_time
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Pending,
    Ready,
    Completed,
}

/// A non-empty process list in arrival order.
///
/// Processes arriving on the same tick keep their input order, which is the
/// FIFO tie-break every policy relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    pub fn new(mut processes: Vec<Process>) -> Result<Self> {
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }
        // Stable, so simultaneous arrivals stay in input order
        processes.sort_by_key(|p| p.arrival_time);

        // No completion can land later than the last arrival plus every burst
        let last_arrival = processes[processes.len() - 1].arrival_time;
        processes
            .iter()
            .try_fold(last_arrival, |t, p| t.checked_add(p.burst_time))
            .ok_or(SimError::ClockOverflow { last_arrival })?;

        Ok(Self { processes })
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, slot: Slot) -> &Process {
        &self.processes[slot]
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_sorts_stably_by_arrival() {
        let workload = Workload::new(vec![
            Process::new(7, 4, 1),
            Process::new(3, 0, 2),
            Process::new(9, 4, 3),
            Process::new(1, 0, 4),
        ])
        .unwrap();

        let ids: Vec<_> = workload.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 7, 9]);
    }

    #[test]
    fn empty_workload_is_rejected() {
        assert!(matches!(
            Workload::new(Vec::new()),
            Err(SimError::EmptyWorkload)
        ));
    }

    #[test]
    fn workload_past_the_clock_range_is_rejected() {
        let err = Workload::new(vec![Process::new(0, Ticks::MAX - 1, 5)]).unwrap_err();
        assert!(matches!(
            err,
            SimError::ClockOverflow { last_arrival } if last_arrival == Ticks::MAX - 1
        ));

        // Bursts alone can overflow even when arrivals are small
        let err = Workload::new(vec![
            Process::new(0, 0, Ticks::MAX / 2 + 1),
            Process::new(1, 3, Ticks::MAX / 2 + 1),
        ])
        .unwrap_err();
        assert!(matches!(err, SimError::ClockOverflow { last_arrival: 3 }));

        let edge = Workload::new(vec![Process::new(0, Ticks::MAX - 5, 5)]).unwrap();
        assert_eq!(edge.len(), 1);
    }

    #[test]
    fn display_matches_input_echo() {
        let p = Process::new(2, 5, 9);
        assert_eq!(p.to_string(), "[id 2 : arrival_time 5,  burst_time 9]");
    }
}
