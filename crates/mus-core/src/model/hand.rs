use crate::model::card::Card;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Cards dealt to each player in a round of mus.
pub const HAND_SIZE: usize = 4;

/// A player's cards in dealing order. Positions only matter when discarding;
/// the evaluators never look at them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == HAND_SIZE
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Swaps the card at `position` for `card`, returning the one taken out.
    pub fn replace(&mut self, position: usize, card: Card) -> Option<Card> {
        let slot = self.cards.get_mut(position)?;
        Some(core::mem::replace(slot, card))
    }
}

impl From<[Card; HAND_SIZE]> for Hand {
    fn from(cards: [Card; HAND_SIZE]) -> Self {
        Self::with_cards(cards.to_vec())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
