use core::fmt;
use serde::{Deserialize, Serialize};

use super::{evaluate_chica, evaluate_grande, evaluate_juego, evaluate_pares, evaluate_punto};
use crate::error::RuleError;
use crate::model::hand::Hand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lance {
    Grande,
    Chica,
    Pares,
    Juego,
    Punto,
}

impl Lance {
    /// Lances in the order they are played. Punto only when nobody has juego.
    pub const ALL: [Lance; 5] = [
        Lance::Grande,
        Lance::Chica,
        Lance::Pares,
        Lance::Juego,
        Lance::Punto,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Lance::Grande => "Grande",
            Lance::Chica => "Chica",
            Lance::Pares => "Pares",
            Lance::Juego => "Juego",
            Lance::Punto => "Punto",
        }
    }

    pub fn evaluate(self, hands: &[Hand], mano: usize) -> Result<Option<usize>, RuleError> {
        match self {
            Lance::Grande => evaluate_grande(hands, mano).map(Some),
            Lance::Chica => evaluate_chica(hands, mano).map(Some),
            Lance::Pares => evaluate_pares(hands, mano),
            Lance::Juego => evaluate_juego(hands, mano),
            Lance::Punto => evaluate_punto(hands, mano).map(Some),
        }
    }
}

impl fmt::Display for Lance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
