use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mus_app::ManualSession;
use mus_core::game::round::MusRound;
use mus_core::game::serialization::RoundSnapshot;

/// Play one round of mus at the terminal.
#[derive(Debug, Parser)]
#[command(name = "mus", author, version, about = "Manual mus round")]
struct Cli {
    /// Number of players at the table.
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Seat of the mano (0-based).
    #[arg(long, default_value_t = 0)]
    mano: usize,

    /// Seed for the deal; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Write the final hands and winners as JSON.
    #[arg(long, value_name = "FILE")]
    export_snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let round = match cli.seed {
        Some(seed) => MusRound::with_seed(seed, cli.players, cli.mano),
        None => MusRound::new(cli.players, cli.mano),
    }
    .with_context(|| format!("dealing {} players with mano {}", cli.players, cli.mano))?;

    let session = ManualSession::new(round, io::stdin().lock(), io::stdout().lock());
    let (round, _) = session.run()?;

    if let Some(path) = cli.export_snapshot {
        let json = RoundSnapshot::to_json(&round).context("serializing round snapshot")?;
        fs::write(&path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
    }

    Ok(())
}
