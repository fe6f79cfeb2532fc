use std::fs;

use anyhow::{Context, Result, bail};
use sched_replay::{
    Sim, SimConfig, init_tracing,
    sim::{BernoulliArrivals, format_processes, load_workload, write_reports},
};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1).peekable();
    if args.peek().map(String::as_str) == Some("generate") {
        args.next();
        return generate(args);
    }

    let config = SimConfig::from_env()?.with_args(args);
    config.validate()?;

    let workload = load_workload(&config.input)
        .with_context(|| format!("failed to load {}", config.input.display()))?;

    let sim = Sim::new(workload);

    info!("printing input ----");
    for process in sim.workload().iter() {
        info!("{process}");
    }

    let outcomes = sim.run_all(&config)?;

    info!(
        "simulating RR with varying quantum ({}..={}) ----",
        config.quantum_sweep.start(),
        config.quantum_sweep.end()
    );
    let rr_sweep = sim.sweep_quantum(config.quantum_sweep.clone())?;

    info!(
        "simulating SJF with varying alpha (steps of 1/{}) ----",
        config.alpha_steps
    );
    let sjf_sweep = sim.sweep_alpha(config.alpha_steps)?;

    // Nothing is written until every simulation has succeeded
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("failed to create {}", config.output_dir.display()))?;
    write_reports(&config.output_dir, &outcomes, &[rr_sweep, sjf_sweep])
        .context("failed to write reports")?;

    for outcome in &outcomes {
        println!(
            "{:<5} average waiting time {:.2}",
            outcome.policy.name(),
            outcome.average_wait()
        );
    }

    Ok(())
}

/// `generate <ticks> <seed> [job_types]`: prints a synthetic process list.
fn generate(mut args: impl Iterator<Item = String>) -> Result<()> {
    let (Some(ticks), Some(seed)) = (args.next(), args.next()) else {
        bail!("usage: sched_replay generate <ticks> <seed> [job_types]");
    };

    let arrivals = BernoulliArrivals {
        ticks: ticks.parse().context("ticks must be a non-negative integer")?,
        job_types: args
            .next()
            .map(|n| n.parse())
            .transpose()
            .context("job_types must be a non-negative integer")?,
        ..Default::default()
    };
    let seed: u64 = seed.parse().context("seed must be a non-negative integer")?;

    let processes = arrivals.generate(seed);
    info!(processes = processes.len(), seed, "generated workload");
    print!("{}", format_processes(&processes));
    Ok(())
}
