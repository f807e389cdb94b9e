use crate::error::RuleError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Ranks of the forty-card Spanish deck. Eights and nines are not dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rank {
    As = 1,
    Dos = 2,
    Tres = 3,
    Cuatro = 4,
    Cinco = 5,
    Seis = 6,
    Siete = 7,
    Sota = 10,
    Caballo = 11,
    Rey = 12,
}

impl Rank {
    pub const ORDERED: [Rank; 10] = [
        Rank::As,
        Rank::Dos,
        Rank::Tres,
        Rank::Cuatro,
        Rank::Cinco,
        Rank::Seis,
        Rank::Siete,
        Rank::Sota,
        Rank::Caballo,
        Rank::Rey,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::As),
            2 => Some(Rank::Dos),
            3 => Some(Rank::Tres),
            4 => Some(Rank::Cuatro),
            5 => Some(Rank::Cinco),
            6 => Some(Rank::Seis),
            7 => Some(Rank::Siete),
            10 => Some(Rank::Sota),
            11 => Some(Rank::Caballo),
            12 => Some(Rank::Rey),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Treses play as reyes and doses as ases.
    pub const fn normalized(self) -> Rank {
        match self {
            Rank::Tres => Rank::Rey,
            Rank::Dos => Rank::As,
            other => other,
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::from_value(value).ok_or(RuleError::InvalidRank(value))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::As => f.write_str("As"),
            Rank::Sota => f.write_str("Sota"),
            Rank::Caballo => f.write_str("Caballo"),
            Rank::Rey => f.write_str("Rey"),
            other => write!(f, "{}", other.value()),
        }
    }
}
