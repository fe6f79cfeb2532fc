use std::{ops::RangeInclusive, path::PathBuf, str::FromStr};

use crate::{
    core::{Result, SimError, Ticks},
    scheduler::{DEFAULT_ALPHA, DEFAULT_QUANTUM, Policy},
};

pub const DEFAULT_INPUT: &str = "input.txt";
pub const DEFAULT_QUANTUM_MAX: Ticks = 10;
pub const DEFAULT_ALPHA_STEPS: u32 = 10;

/// Run configuration for the simulator binary.
///
/// Environment variables:
/// - `SCHED_INPUT`: process list to replay (default `input.txt`)
/// - `SCHED_OUTPUT_DIR`: where reports are written (default `.`)
/// - `SCHED_QUANTUM`: RR quantum for the single-run report (default 2)
/// - `SCHED_ALPHA`: SJF smoothing constant for the single-run report (default 0.5)
/// - `SCHED_QUANTUM_MAX`: upper end of the quantum sweep `1..=max` (default 10)
///
/// Positional arguments `[input] [output_dir]` override the first two.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub quantum: Ticks,
    pub alpha: f64,
    pub quantum_sweep: RangeInclusive<Ticks>,
    pub alpha_steps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            quantum: DEFAULT_QUANTUM,
            alpha: DEFAULT_ALPHA,
            quantum_sweep: 1..=DEFAULT_QUANTUM_MAX,
            alpha_steps: DEFAULT_ALPHA_STEPS,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(input) = lookup("SCHED_INPUT") {
            config.input = PathBuf::from(input);
        }
        if let Some(dir) = lookup("SCHED_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(quantum) = parse_var(&lookup, "SCHED_QUANTUM")? {
            config.quantum = quantum;
        }
        if let Some(alpha) = parse_var(&lookup, "SCHED_ALPHA")? {
            config.alpha = alpha;
        }
        if let Some(max) = parse_var(&lookup, "SCHED_QUANTUM_MAX")? {
            config.quantum_sweep = 1..=max;
        }

        Ok(config)
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();
        if let Some(input) = args.next() {
            self.input = PathBuf::from(input);
        }
        if let Some(dir) = args.next() {
            self.output_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        Policy::RoundRobin {
            quantum: self.quantum,
        }
        .validate()?;
        Policy::Sjf { alpha: self.alpha }.validate()?;
        if self.quantum_sweep.is_empty() || *self.quantum_sweep.start() == 0 {
            return Err(SimError::InvalidQuantum);
        }
        if self.alpha_steps == 0 {
            return Err(SimError::InvalidConfig {
                key: "alpha_steps",
                value: self.alpha_steps.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| SimError::InvalidConfig { key, value })
        })
        .transpose()
}
