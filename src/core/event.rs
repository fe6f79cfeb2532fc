use crate::core::{ProcessId, Slot, Ticks};

/// One contiguous run segment: `pid` took the CPU at `at` and held it for
/// `ran_for` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEvent {
    pub at: Ticks,
    pub pid: ProcessId,
    pub slot: Slot,
    pub ran_for: Ticks,
}

impl DispatchEvent {
    pub fn end(&self) -> Ticks {
        self.at + self.ran_for
    }

    pub fn pair(&self) -> (Ticks, ProcessId) {
        (self.at, self.pid)
    }
}
