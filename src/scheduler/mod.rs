pub mod fcfs;
pub mod rr;
pub mod sjf;
pub mod srtf;

use std::fmt;

use tracing::info;

use crate::core::{Outcome, Result, RunState, SimError, Slot, Ticks, Workload, simulate};
pub use fcfs::FcfsScheduler;
pub use rr::RoundRobinScheduler;
pub use sjf::{PredictionUpdate, SjfScheduler};
pub use srtf::SrtfScheduler;

pub const DEFAULT_QUANTUM: Ticks = 2;
pub const DEFAULT_ALPHA: f64 = 0.5;
pub const SEED_PREDICTION: f64 = 5.0;

/// Policy hooks invoked by [`simulate`].
///
/// A scheduler owns its ready population; the run state owns the clock and
/// remaining times. Every hook sees the run state as of the call.
pub trait Scheduler {
    fn policy(&self) -> Policy;

    /// Latest arrival time admitted at a decision point taken at `now`.
    fn admission_horizon(&self, now: Ticks) -> Ticks {
        now
    }

    fn enqueue(&mut self, run: &RunState, slot: Slot);

    fn pick_next(&mut self, run: &RunState) -> Option<Slot>;

    /// Upper bound on the run segment about to start for `slot`.
    fn slice(&self, _run: &RunState, _slot: Slot) -> Ticks {
        Ticks::MAX
    }

    // Called when a segment ends with burst left over
    fn requeue(&mut self, run: &RunState, slot: Slot) {
        self.enqueue(run, slot);
    }

    fn completed(&mut self, _run: &RunState, _slot: Slot) {}
}

/// The closed set of scheduling policies and their parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    Fcfs,
    RoundRobin { quantum: Ticks },
    Srtf,
    Sjf { alpha: f64 },
}

impl Policy {
    pub fn round_robin(quantum: Ticks) -> Result<Self> {
        let policy = Self::RoundRobin { quantum };
        policy.validate()?;
        Ok(policy)
    }

    pub fn sjf(alpha: f64) -> Result<Self> {
        let policy = Self::Sjf { alpha };
        policy.validate()?;
        Ok(policy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin { .. } => "RR",
            Self::Srtf => "SRTF",
            Self::Sjf { .. } => "SJF",
        }
    }

    /// The tunable parameter as printed in sweep reports.
    pub fn parameter(&self) -> Option<String> {
        match self {
            Self::RoundRobin { quantum } => Some(quantum.to_string()),
            Self::Sjf { alpha } => Some(format!("{alpha:?}")),
            Self::Fcfs | Self::Srtf => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::RoundRobin { quantum: 0 } => Err(SimError::InvalidQuantum),
            // Written this way round so NaN is rejected too
            Self::Sjf { alpha } if !(0.0..=1.0).contains(&alpha) => {
                Err(SimError::InvalidAlpha(alpha))
            }
            _ => Ok(()),
        }
    }

    pub fn run(&self, workload: &Workload) -> Result<Outcome> {
        self.validate()?;

        let outcome = match *self {
            Self::Fcfs => simulate(workload, &mut FcfsScheduler::new()),
            Self::RoundRobin { quantum } => {
                simulate(workload, &mut RoundRobinScheduler::new(quantum))
            }
            Self::Srtf => simulate(workload, &mut SrtfScheduler::new()),
            Self::Sjf { alpha } => simulate(workload, &mut SjfScheduler::new(alpha)),
        };

        info!(
            policy = %self,
            dispatches = outcome.schedule.len(),
            avg_wait = outcome.average_wait(),
            "simulation complete"
        );
        Ok(outcome)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "RR(quantum={quantum})"),
            Self::Sjf { alpha } => write!(f, "SJF(alpha={alpha})"),
            _ => f.write_str(self.name()),
        }
    }
}
