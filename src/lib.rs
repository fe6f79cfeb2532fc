pub mod config;
pub mod core;
pub mod scheduler;
pub mod sim;
pub mod telemetry;

pub use crate::config::SimConfig;
pub use crate::core::{DispatchEvent, Outcome, Process, ProcessId, Result, SimError, Ticks, Workload};
pub use crate::scheduler::{Policy, Scheduler};
pub use crate::sim::{Sim, Sweep};
pub use crate::telemetry::init_tracing;
