mod schedule;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mus_core::game::round::{MusRound, RoundError};
use mus_core::rules::{Lance, ParesProfile, RoundOutcome, classify_pares};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary};
use crate::config::{BenchConfig, ResolvedOutputs};

pub use schedule::ManoSchedule;

/// Deals and evaluates seeded rounds, streaming one JSONL row per round.
pub struct SimulationRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    schedule: ManoSchedule,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub analytics: AnalyticsSummary,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let players = config.deals.players;
        // Deal once up front so an impossible table fails before any file is created.
        MusRound::with_seed(0, players, 0)?;

        Ok(Self {
            schedule: ManoSchedule::new(players, config.deals.rotate_mano),
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        })
    }

    /// Execute the simulation, writing rows and the Markdown summary to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut analytics = AnalyticsCollector::new(self.config.deals.players);
        let mut rows_written = 0usize;

        for round_index in 0..self.config.deals.rounds {
            let deal_seed = rng.next_u64();
            let mano = self.schedule.mano_for(round_index);
            let record = self.play_round(round_index, deal_seed, mano)?;
            analytics.record_round(&record.outcome)?;
            write_round_row(&mut writer, &self.config, &record)?;
            rows_written += 1;
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md, &self.config.run_id)?;

        Ok(RunSummary {
            rounds_played: self.config.deals.rounds,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            analytics: summary,
        })
    }

    fn play_round(
        &self,
        round_index: usize,
        deal_seed: u64,
        mano: usize,
    ) -> Result<RoundRecord, RunnerError> {
        let round = MusRound::with_seed(deal_seed, self.config.deals.players, mano)?;
        let outcome = round.evaluate().map_err(RoundError::from)?;
        let profiles = round
            .hands()
            .iter()
            .map(classify_pares)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|defect| RunnerError::round(format!("pares profile failed: {defect}")))?;

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "mus_bench::round",
                Level::INFO,
                run_id = %self.config.run_id,
                round_index = round_index as u32,
                deal_seed,
                mano = mano as u32,
                grande = outcome.grande as u32,
                chica = outcome.chica as u32,
                pares = ?outcome.pares,
                juego = ?outcome.juego,
            );
        }

        Ok(RoundRecord {
            round_index,
            deal_seed,
            hands: round.hands().iter().map(ToString::to_string).collect(),
            profiles,
            outcome,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_round_row(
    writer: &mut BufWriter<File>,
    config: &BenchConfig,
    record: &RoundRecord,
) -> Result<(), RunnerError> {
    let outcome = &record.outcome;
    let row = RoundLogRow {
        run_id: &config.run_id,
        round_id: format!("R{:06}", record.round_index),
        round_index: record.round_index,
        deal_seed: record.deal_seed,
        mano: outcome.mano,
        hands: &record.hands,
        pares_profiles: &record.profiles,
        totals: &outcome.totals,
        grande: outcome.grande,
        chica: outcome.chica,
        pares: outcome.pares,
        juego: outcome.winner(Lance::Juego),
        punto: outcome.winner(Lance::Punto),
        punto_played: outcome.punto_played(),
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

struct RoundRecord {
    round_index: usize,
    deal_seed: u64,
    hands: Vec<String>,
    profiles: Vec<ParesProfile>,
    outcome: RoundOutcome,
}

#[derive(Serialize)]
struct RoundLogRow<'a> {
    run_id: &'a str,
    round_id: String,
    round_index: usize,
    deal_seed: u64,
    mano: usize,
    hands: &'a [String],
    pares_profiles: &'a [ParesProfile],
    totals: &'a [u8],
    grande: usize,
    chica: usize,
    pares: Option<usize>,
    juego: Option<usize>,
    punto: Option<usize>,
    punto_played: bool,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("round could not be dealt or evaluated: {0}")]
    Deal(#[from] RoundError),
    #[error("round evaluation failed: {message}")]
    Round { message: String },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl RunnerError {
    fn round(message: String) -> Self {
        RunnerError::Round { message }
    }
}
