use std::ops::RangeInclusive;

use average::Min;
use tracing::{info, instrument};

use crate::{
    config::SimConfig,
    core::{Outcome, Result, Ticks, Workload},
    scheduler::Policy,
};

/// Replays one workload under any number of policies.
pub struct Sim {
    workload: Workload,
}

impl Sim {
    pub fn new(workload: Workload) -> Self {
        Self { workload }
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn run(&self, policy: Policy) -> Result<Outcome> {
        policy.run(&self.workload)
    }

    /// FCFS, RR, SRTF and SJF with the configured parameters, in that order.
    pub fn run_all(&self, config: &SimConfig) -> Result<Vec<Outcome>> {
        [
            Policy::Fcfs,
            Policy::round_robin(config.quantum)?,
            Policy::Srtf,
            Policy::sjf(config.alpha)?,
        ]
        .into_iter()
        .map(|policy| {
            info!("simulating {} ----", policy.name());
            self.run(policy)
        })
        .collect()
    }

    pub fn sweep(&self, policies: impl IntoIterator<Item = Policy>) -> Result<Sweep> {
        let points = policies
            .into_iter()
            .map(|policy| {
                self.run(policy).map(|outcome| SweepPoint {
                    policy,
                    average_wait: outcome.average_wait(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let sweep = Sweep { points };
        if let Some(best) = sweep.best() {
            info!(best = %best.policy, avg_wait = best.average_wait, "sweep complete");
        }
        Ok(sweep)
    }

    #[instrument(skip(self))]
    pub fn sweep_quantum(&self, quanta: RangeInclusive<Ticks>) -> Result<Sweep> {
        self.sweep(quanta.map(|quantum| Policy::RoundRobin { quantum }))
    }

    /// Sweeps alpha over `0, 1/steps, ..., 1`.
    #[instrument(skip(self))]
    pub fn sweep_alpha(&self, steps: u32) -> Result<Sweep> {
        let steps = steps.max(1);
        self.sweep((0..=steps).map(|i| Policy::Sjf {
            alpha: f64::from(i) / f64::from(steps),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub policy: Policy,
    pub average_wait: f64,
}

/// Average waiting time per parameter value of one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub points: Vec<SweepPoint>,
}

impl Sweep {
    pub fn name(&self) -> &'static str {
        self.points.first().map_or("sweep", |p| p.policy.name())
    }

    pub fn minimum_wait(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.average_wait)
            .collect::<Min>()
            .min()
    }

    // First point wins on ties, so the smallest parameter is preferred
    pub fn best(&self) -> Option<&SweepPoint> {
        self.points.iter().reduce(|best, p| {
            if p.average_wait < best.average_wait {
                p
            } else {
                best
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Process;

    fn sim() -> Sim {
        Sim::new(
            Workload::new(vec![
                Process::new(0, 0, 8),
                Process::new(1, 1, 4),
                Process::new(2, 2, 9),
                Process::new(3, 3, 5),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn run_all_follows_policy_order() {
        let outcomes = sim().run_all(&SimConfig::default()).unwrap();
        let names: Vec<_> = outcomes.iter().map(|o| o.policy.name()).collect();
        assert_eq!(names, vec!["FCFS", "RR", "SRTF", "SJF"]);
        assert_eq!(outcomes[1].policy, Policy::RoundRobin { quantum: 2 });
    }

    #[test]
    fn quantum_sweep_covers_range_and_finds_minimum() {
        let sweep = sim().sweep_quantum(1..=10).unwrap();
        assert_eq!(sweep.points.len(), 10);
        assert_eq!(sweep.name(), "RR");

        let best = sweep.best().unwrap();
        assert_eq!(best.average_wait, sweep.minimum_wait());
        assert!(sweep.points.iter().all(|p| p.average_wait >= best.average_wait));
        // A quantum covering every burst reproduces FCFS
        assert_eq!(sweep.points[9].average_wait, 8.75);
    }

    #[test]
    fn alpha_sweep_uses_tenths() {
        let sweep = sim().sweep_alpha(10).unwrap();
        let labels: Vec<_> = sweep
            .points
            .iter()
            .filter_map(|p| p.policy.parameter())
            .collect();
        assert_eq!(labels.first().map(String::as_str), Some("0.0"));
        assert_eq!(labels.get(3).map(String::as_str), Some("0.3"));
        assert_eq!(labels.last().map(String::as_str), Some("1.0"));
        assert_eq!(labels.len(), 11);
    }

    #[test]
    fn alpha_sweep_labels_keep_full_precision() {
        let sweep = sim().sweep_alpha(4).unwrap();
        let labels: Vec<_> = sweep
            .points
            .iter()
            .filter_map(|p| p.policy.parameter())
            .collect();
        assert_eq!(labels, vec!["0.0", "0.25", "0.5", "0.75", "1.0"]);
    }
}
