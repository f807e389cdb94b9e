use std::path::PathBuf;

use clap::Parser;

use mus_bench::config::{BenchConfig, ResolvedOutputs};
use mus_bench::logging::init_logging;
use mus_bench::simulation::SimulationRunner;

/// Seeded round simulator for mus hand evaluation.
#[derive(Debug, Parser)]
#[command(
    name = "mus-bench",
    author,
    version,
    about = "Deterministic mus round simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/mus.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to deal.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.deals.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let players = config.deals.players;
    let rounds = config.deals.rounds;

    println!("Loaded configuration '{run_id}' ({rounds} rounds, {players} players)");

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} rounds -> {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }
    for report in &summary.analytics.lances {
        println!(
            "  {:<7} mano share {:>5.1}% (p = {:.3}), void {}",
            report.lance.as_str(),
            report.mano_share * 100.0,
            report.p_value,
            report.void
        );
    }

    Ok(())
}
