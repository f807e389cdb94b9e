use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Suit {
    Oros = 0,
    Copas = 1,
    Espadas = 2,
    Bastos = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Oros, Suit::Copas, Suit::Espadas, Suit::Bastos];

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Oros => "oros",
            Suit::Copas => "copas",
            Suit::Espadas => "espadas",
            Suit::Bastos => "bastos",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oros" | "o" => Ok(Suit::Oros),
            "copas" | "c" => Ok(Suit::Copas),
            "espadas" | "e" => Ok(Suit::Espadas),
            "bastos" | "b" => Ok(Suit::Bastos),
            other => Err(format!("unknown suit '{other}'")),
        }
    }
}
