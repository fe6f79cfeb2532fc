use std::num::ParseIntError;

use thiserror::Error;

use super::state::{ProcessId, Ticks};

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("line {line}: expected 3 fields (id, arrival, burst), found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: process {id} has zero burst time")]
    ZeroBurst { line: usize, id: ProcessId },

    #[error("no processes to schedule")]
    EmptyWorkload,

    #[error("workload does not fit the clock: last arrival {last_arrival} plus total burst overflows")]
    ClockOverflow { last_arrival: Ticks },

    #[error("round-robin quantum must be positive")]
    InvalidQuantum,

    #[error("smoothing constant {0} is outside [0, 1]")]
    InvalidAlpha(f64),

    #[error("invalid value '{value}' for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
