use rand::prelude::*;

use crate::core::{Process, ProcessId, Ticks};

/// Synthetic workload: on each tick a process arrives with probability
/// `p_arrival`, and is short with probability `p_short`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliArrivals {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    /// When set, ids are drawn from `0..job_types` so SJF sees recurring jobs.
    pub job_types: Option<ProcessId>,
}

impl Default for BernoulliArrivals {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            job_types: None,
        }
    }
}

impl BernoulliArrivals {
    pub fn generate(&self, seed: u64) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut processes = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst_time = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };

                let id = match self.job_types {
                    Some(types) if types > 0 => rng.random_range(0..types),
                    _ => processes.len() as ProcessId,
                };

                processes.push(Process::new(id, t, burst_time.max(1)));
            }
        }

        processes
    }
}
