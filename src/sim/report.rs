use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use super::driver::Sweep;
use crate::core::{Outcome, Result};

pub fn write_schedule<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    for (at, pid) in outcome.pairs() {
        writeln!(out, "({at}, {pid})")?;
    }
    write_footer(out, outcome.average_wait())
}

pub fn write_sweep<W: Write>(out: &mut W, sweep: &Sweep) -> io::Result<()> {
    for point in &sweep.points {
        let parameter = point.policy.parameter().unwrap_or_default();
        writeln!(out, "({parameter}, {:?})", point.average_wait)?;
    }
    write_footer(out, sweep.minimum_wait())
}

fn write_footer<W: Write>(out: &mut W, average_wait: f64) -> io::Result<()> {
    writeln!(out, "average waiting time {average_wait:.2} ")
}

pub fn schedule_path(dir: &Path, outcome: &Outcome) -> PathBuf {
    dir.join(format!("{}.txt", outcome.policy.name()))
}

pub fn sweep_path(dir: &Path, sweep: &Sweep) -> PathBuf {
    dir.join(format!("{}_test.txt", sweep.name()))
}

/// Writes one file per outcome and per sweep into `dir`.
pub fn write_reports(dir: &Path, outcomes: &[Outcome], sweeps: &[Sweep]) -> Result<()> {
    for outcome in outcomes {
        let path = schedule_path(dir, outcome);
        let mut out = BufWriter::new(File::create(&path)?);
        write_schedule(&mut out, outcome)?;
        out.flush()?;
        info!(path = %path.display(), "report written");
    }

    for sweep in sweeps {
        let path = sweep_path(dir, sweep);
        let mut out = BufWriter::new(File::create(&path)?);
        write_sweep(&mut out, sweep)?;
        out.flush()?;
        info!(path = %path.display(), "sweep report written");
    }

    Ok(())
}
