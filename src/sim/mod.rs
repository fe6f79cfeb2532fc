pub mod driver;
pub mod generate;
pub mod loader;
pub mod report;

pub use driver::{Sim, Sweep, SweepPoint};
pub use generate::BernoulliArrivals;
pub use loader::{format_processes, load_workload, parse_processes};
pub use report::write_reports;
