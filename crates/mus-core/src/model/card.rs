use crate::error::RuleError;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from a raw rank value, rejecting ranks outside the Spanish deck.
    pub fn from_raw(rank: u8, suit: Suit) -> Result<Self, RuleError> {
        Ok(Self::new(Rank::try_from(rank)?, suit))
    }

    pub const fn normalized_rank(self) -> u8 {
        self.rank.normalized().value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} de {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};
    use crate::error::RuleError;

    #[test]
    fn displays_like_the_table_calls_it() {
        assert_eq!(Card::new(Rank::As, Suit::Oros).to_string(), "As de oros");
        assert_eq!(
            Card::new(Rank::Caballo, Suit::Espadas).to_string(),
            "Caballo de espadas"
        );
        assert_eq!(Card::new(Rank::Siete, Suit::Copas).to_string(), "7 de copas");
    }

    #[test]
    fn from_raw_validates_rank() {
        assert_eq!(
            Card::from_raw(12, Suit::Bastos),
            Ok(Card::new(Rank::Rey, Suit::Bastos))
        );
        assert_eq!(
            Card::from_raw(8, Suit::Bastos),
            Err(RuleError::InvalidRank(8))
        );
    }

    #[test]
    fn tres_counts_as_rey() {
        let card = Card::new(Rank::Tres, Suit::Copas);
        assert_eq!(card.normalized_rank(), 12);
    }

    #[test]
    fn serializes_rank_as_number() {
        let card = Card::new(Rank::Sota, Suit::Oros);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"rank":10,"suit":"oros"}"#);
        let bad = serde_json::from_str::<Card>(r#"{"rank":9,"suit":"oros"}"#);
        assert!(bad.is_err());
    }
}
