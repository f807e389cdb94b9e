use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use mus_core::rules::{Lance, RoundOutcome};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("round reported {found} totals for a table of {expected}")]
    SeatCount { expected: usize, found: usize },
    #[error("lance {lance} won by seat {seat} at a table of {players}")]
    UnknownSeat {
        lance: Lance,
        seat: usize,
        players: usize,
    },
    #[error("statistics failure: {0}")]
    Stats(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-lance results across simulated rounds.
pub struct AnalyticsCollector {
    players: usize,
    rounds: usize,
    lances: HashMap<Lance, LanceAccumulator>,
    juego_totals: BTreeMap<u8, usize>,
}

impl AnalyticsCollector {
    pub fn new(players: usize) -> Self {
        let lances = Lance::ALL
            .iter()
            .map(|&lance| (lance, LanceAccumulator::new(players)))
            .collect();
        Self {
            players,
            rounds: 0,
            lances,
            juego_totals: BTreeMap::new(),
        }
    }

    pub fn record_round(&mut self, outcome: &RoundOutcome) -> Result<(), AnalyticsError> {
        if outcome.totals.len() != self.players {
            return Err(AnalyticsError::SeatCount {
                expected: self.players,
                found: outcome.totals.len(),
            });
        }

        self.rounds += 1;
        for &total in &outcome.totals {
            *self.juego_totals.entry(total).or_insert(0) += 1;
        }

        for lance in Lance::ALL {
            let winner = outcome.winner(lance);
            // Punto is only contested when nobody holds juego, and vice versa.
            let contested = match lance {
                Lance::Juego => !outcome.punto_played(),
                Lance::Punto => outcome.punto_played(),
                _ => true,
            };
            if !contested {
                continue;
            }
            let acc = self
                .lances
                .get_mut(&lance)
                .ok_or(AnalyticsError::Stats(format!("no accumulator for {lance}")))?;
            acc.record(lance, winner, outcome.mano, self.players)?;
        }

        Ok(())
    }

    pub fn finalize(mut self) -> Result<AnalyticsSummary, AnalyticsError> {
        let normal =
            Normal::new(0.0, 1.0).map_err(|err| AnalyticsError::Stats(err.to_string()))?;
        let fair_share = 1.0 / self.players as f64;

        let mut lances = Vec::with_capacity(Lance::ALL.len());
        for lance in Lance::ALL {
            if let Some(acc) = self.lances.remove(&lance) {
                lances.push(acc.into_report(lance, fair_share, &normal));
            }
        }

        Ok(AnalyticsSummary {
            players: self.players,
            rounds: self.rounds,
            lances,
            juego_totals: self.juego_totals.into_iter().collect(),
        })
    }
}

struct LanceAccumulator {
    contested: usize,
    void: usize,
    seat_wins: Vec<usize>,
    mano_wins: usize,
}

impl LanceAccumulator {
    fn new(players: usize) -> Self {
        Self {
            contested: 0,
            void: 0,
            seat_wins: vec![0; players],
            mano_wins: 0,
        }
    }

    fn record(
        &mut self,
        lance: Lance,
        winner: Option<usize>,
        mano: usize,
        players: usize,
    ) -> Result<(), AnalyticsError> {
        self.contested += 1;
        let Some(seat) = winner else {
            self.void += 1;
            return Ok(());
        };
        let slot = self
            .seat_wins
            .get_mut(seat)
            .ok_or(AnalyticsError::UnknownSeat {
                lance,
                seat,
                players,
            })?;
        *slot += 1;
        if seat == mano {
            self.mano_wins += 1;
        }
        Ok(())
    }

    fn into_report(self, lance: Lance, fair_share: f64, normal: &Normal) -> LanceReport {
        let decided = self.contested - self.void;
        let (mano_share, ci95, p_value) = if decided == 0 {
            (0.0, (0.0, 0.0), 1.0)
        } else {
            let n = decided as f64;
            let share = self.mano_wins as f64 / n;
            let margin = CONFIDENCE_Z * (share * (1.0 - share) / n).sqrt();
            let ci = ((share - margin).max(0.0), (share + margin).min(1.0));
            (share, ci, fair_share_p_value(share, fair_share, n, normal))
        };

        LanceReport {
            lance,
            contested: self.contested,
            void: self.void,
            seat_wins: self.seat_wins,
            mano_wins: self.mano_wins,
            mano_share,
            ci95,
            p_value,
        }
    }
}

/// Two-sided z-test of the mano's win share against an even split of the table.
fn fair_share_p_value(share: f64, fair_share: f64, n: f64, normal: &Normal) -> f64 {
    let variance = fair_share * (1.0 - fair_share) / n;
    if variance <= 0.0 {
        return 1.0;
    }
    let z = (share - fair_share) / variance.sqrt();
    (2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct LanceReport {
    pub lance: Lance,
    /// Rounds in which the lance was played, including those nobody could win.
    pub contested: usize,
    pub void: usize,
    pub seat_wins: Vec<usize>,
    pub mano_wins: usize,
    pub mano_share: f64,
    pub ci95: (f64, f64),
    pub p_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub players: usize,
    pub rounds: usize,
    pub lances: Vec<LanceReport>,
    pub juego_totals: Vec<(u8, usize)>,
}

impl AnalyticsSummary {
    pub fn lance(&self, lance: Lance) -> Option<&LanceReport> {
        self.lances.iter().find(|report| report.lance == lance)
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>, run_id: &str) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Mus Simulation Summary: {run_id}\n\n"));
        rows.push_str(&format!(
            "{} rounds at a table of {} players\n\n",
            self.rounds, self.players
        ));

        rows.push_str("| Lance | Played | Void |");
        for seat in 0..self.players {
            rows.push_str(&format!(" Seat {} |", seat + 1));
        }
        rows.push_str(" Mano % | 95% CI | p-value |\n");
        rows.push_str("|-------|--------|------|");
        for _ in 0..self.players {
            rows.push_str("--------|");
        }
        rows.push_str("--------|--------|---------|\n");

        for report in &self.lances {
            rows.push_str(&format!(
                "| {} | {} | {} |",
                report.lance, report.contested, report.void
            ));
            for wins in &report.seat_wins {
                rows.push_str(&format!(" {wins} |"));
            }
            rows.push_str(&format!(
                " {share:.1}% | [{low:.3}, {high:.3}] | {pval:.3} |\n",
                share = report.mano_share * 100.0,
                low = report.ci95.0,
                high = report.ci95.1,
                pval = report.p_value,
            ));
        }

        rows.push_str("\n## Hand totals\n\n| Total | Hands |\n|-------|-------|\n");
        for (total, count) in &self.juego_totals {
            rows.push_str(&format!("| {total} | {count} |\n"));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}
