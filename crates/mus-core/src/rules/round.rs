use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use super::juego::hand_total;
use super::lance::Lance;
use super::{
    check_table, evaluate_chica, evaluate_grande, evaluate_juego, evaluate_pares, evaluate_punto,
    per_seat,
};
use crate::error::RuleError;
use crate::model::hand::Hand;

/// How the last lance was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "lance", rename_all = "snake_case")]
pub enum JuegoOutcome {
    Juego { winner: usize },
    /// Nobody reached 31, so the highest total took the punto.
    Punto { winner: usize },
}

impl JuegoOutcome {
    pub const fn winner(self) -> usize {
        match self {
            JuegoOutcome::Juego { winner } | JuegoOutcome::Punto { winner } => winner,
        }
    }

    pub const fn lance(self) -> Lance {
        match self {
            JuegoOutcome::Juego { .. } => Lance::Juego,
            JuegoOutcome::Punto { .. } => Lance::Punto,
        }
    }
}

/// Winners of every lance of one deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub mano: usize,
    pub grande: usize,
    pub chica: usize,
    pub pares: Option<usize>,
    pub juego: JuegoOutcome,
    pub totals: Vec<u8>,
}

impl RoundOutcome {
    /// Winner of `lance`, or `None` when it was void or not played.
    pub fn winner(&self, lance: Lance) -> Option<usize> {
        match lance {
            Lance::Grande => Some(self.grande),
            Lance::Chica => Some(self.chica),
            Lance::Pares => self.pares,
            Lance::Juego | Lance::Punto if self.juego.lance() == lance => Some(self.juego.winner()),
            Lance::Juego | Lance::Punto => None,
        }
    }

    pub fn punto_played(&self) -> bool {
        matches!(self.juego, JuegoOutcome::Punto { .. })
    }
}

/// Plays grande, chica, pares and juego in order, falling back to punto when
/// no hand reaches 31.
pub fn evaluate_round(hands: &[Hand], mano: usize) -> Result<RoundOutcome, RuleError> {
    check_table(hands, mano)?;
    let totals = per_seat(hands, hand_total)?;

    let grande = evaluate_grande(hands, mano)?;
    let chica = evaluate_chica(hands, mano)?;
    let pares = evaluate_pares(hands, mano)?;
    let juego = match evaluate_juego(hands, mano)? {
        Some(winner) => JuegoOutcome::Juego { winner },
        None => JuegoOutcome::Punto {
            winner: evaluate_punto(hands, mano)?,
        },
    };

    if tracing::enabled!(Level::DEBUG) {
        event!(
            target: "mus_core::rules",
            Level::DEBUG,
            mano,
            players = hands.len(),
            grande,
            chica,
            pares = ?pares,
            juego = ?juego,
            totals = ?totals,
        );
    }

    Ok(RoundOutcome {
        mano,
        grande,
        chica,
        pares,
        juego,
        totals,
    })
}
