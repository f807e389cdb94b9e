use std::io::{self, BufRead, Write};

use mus_core::AppInfo;
use mus_core::error::RuleError;
use mus_core::game::round::{MusRound, MusVote, RoundError, mus_agreed};
use mus_core::rules::{JuegoOutcome, RoundOutcome};
use thiserror::Error;
use tracing::{Level, event};

use crate::discard::parse_discard;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Rule(#[from] RuleError),
}

enum MusPhase {
    Continue,
    Corta,
}

/// Drives one manual round over any line-based input and output: deal,
/// repeated mus votes with discards, then the result of every lance.
pub struct ManualSession<R, W> {
    round: MusRound,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ManualSession<R, W> {
    pub fn new(round: MusRound, input: R, output: W) -> Self {
        Self {
            round,
            input,
            output,
        }
    }

    /// Plays the round to completion and hands it back for export.
    pub fn run(mut self) -> Result<(MusRound, RoundOutcome), SessionError> {
        writeln!(
            self.output,
            "Welcome to {} {} (manual mode)",
            AppInfo::name(),
            AppInfo::version()
        )?;
        writeln!(self.output, "(Mano is Player {})", self.round.mano() + 1)?;
        self.show_hands("hand")?;

        writeln!(self.output, "\n--- Mus Phase ---")?;
        while let MusPhase::Continue = self.mus_turn()? {
            self.show_hands("new hand")?;
            writeln!(self.output, "\n--- Another round of Mus ---")?;
        }

        let outcome = self.round.evaluate()?;
        self.report(&outcome)?;
        self.output.flush()?;
        Ok((self.round, outcome))
    }

    fn mus_turn(&mut self) -> Result<MusPhase, SessionError> {
        let votes = self.collect_votes()?;
        if !mus_agreed(votes) {
            return Ok(MusPhase::Corta);
        }

        self.round.record_mus();
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "mus_app::session",
                Level::DEBUG,
                mus_count = self.round.mus_count(),
                stock = self.round.stock_remaining() as u32,
            );
        }
        writeln!(self.output, "\nAll players agreed: MUS! Discarding cards...")?;

        for player in 0..self.round.player_count() {
            let Some(positions) = self.read_discard(player)? else {
                writeln!(self.output, "\nInput closed: CORTA.\n")?;
                return Ok(MusPhase::Corta);
            };
            let replaced = self.round.discard(player, &positions)?;
            if replaced < positions.len() {
                writeln!(self.output, "Deck is empty! Cannot replace more cards.")?;
            }
        }
        Ok(MusPhase::Continue)
    }

    /// Asks each seat in turn; the first corta ends the questioning.
    fn collect_votes(&mut self) -> Result<Vec<MusVote>, SessionError> {
        let mut votes = Vec::with_capacity(self.round.player_count());
        for player in 0..self.round.player_count() {
            let prompt = format!("Player {}, do you want \"mus\"? (y/n): ", player + 1);
            let vote = match self.prompt(&prompt)? {
                Some(answer) => MusVote::from_answer(&answer),
                None => MusVote::Corta,
            };
            votes.push(vote);
            if vote == MusVote::Corta {
                writeln!(
                    self.output,
                    "\nPlayer {} said no: CORTA. Proceeding to the lances...\n",
                    player + 1
                )?;
                break;
            }
        }
        Ok(votes)
    }

    /// Asks until the player enters a valid discard. `None` on end of input.
    fn read_discard(&mut self, player: usize) -> Result<Option<Vec<usize>>, SessionError> {
        let prompt = format!(
            "Player {}, enter card numbers to discard (comma-separated, e.g., \"1,3\"): ",
            player + 1
        );
        loop {
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            match parse_discard(&line) {
                Ok(positions) => return Ok(Some(positions)),
                Err(err) => writeln!(self.output, "Error: {err}. Try again.")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn show_hands(&mut self, label: &str) -> Result<(), SessionError> {
        for (player, hand) in self.round.hands().iter().enumerate() {
            writeln!(self.output, "\nPlayer {}'s {label}:", player + 1)?;
            for (position, card) in hand.iter().enumerate() {
                writeln!(self.output, "{}: {card}", position + 1)?;
            }
        }
        Ok(())
    }

    fn report(&mut self, outcome: &RoundOutcome) -> Result<(), SessionError> {
        let out = &mut self.output;
        writeln!(out, "--- Grande Phase ---")?;
        writeln!(out, "Player {} wins Grande!", outcome.grande + 1)?;

        writeln!(out, "\n--- Chica Phase ---")?;
        writeln!(out, "Player {} wins Chica!", outcome.chica + 1)?;

        writeln!(out, "\n--- Pares Phase ---")?;
        match outcome.pares {
            Some(winner) => writeln!(out, "Player {} wins Pares!", winner + 1)?,
            None => writeln!(out, "No one has pares.")?,
        }

        writeln!(out, "\n--- Juego Phase ---")?;
        match outcome.juego {
            JuegoOutcome::Juego { winner } => {
                writeln!(out, "Player {} wins Juego!", winner + 1)?;
            }
            JuegoOutcome::Punto { winner } => {
                writeln!(
                    out,
                    "No one has juego (less than 31 points). Proceeding to Punto..."
                )?;
                writeln!(out, "\n--- Punto Phase ---")?;
                writeln!(out, "Player {} wins Punto!", winner + 1)?;
            }
        }
        Ok(())
    }
}
