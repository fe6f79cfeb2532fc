pub mod driver;
pub mod error;
pub mod event;
pub mod state;
pub mod timeline;

pub use driver::{RunState, simulate};
pub use error::{Result, SimError};
pub use event::DispatchEvent;
pub use state::{Process, ProcessId, ProcessState, Slot, Ticks, Workload};
pub use timeline::{Outcome, Timeline};
