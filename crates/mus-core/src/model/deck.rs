use crate::error::DeckError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 40;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

/// Hands produced by [`Deck::deal`] together with the undealt stock used for
/// mus replacements.
#[derive(Debug, Clone)]
pub struct Deal {
    pub hands: Vec<Hand>,
    pub stock: Deck,
}

impl Deck {
    /// Rank-major ordering: every suit of the as, then every suit of the dos, and so on.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::ORDERED.iter().copied() {
            for suit in Suit::ALL.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards, next: 0 }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards[self.next..].shuffle(rng);
    }

    /// Cards not yet dealt or drawn.
    pub fn cards(&self) -> &[Card] {
        &self.cards[self.next..]
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }

    /// Hands out consecutive runs of `cards_per_player` cards, one run per player.
    pub fn deal(mut self, num_players: usize, cards_per_player: usize) -> Result<Deal, DeckError> {
        if num_players == 0 || cards_per_player == 0 {
            return Err(DeckError::InvalidDeal {
                num_players,
                cards_per_player,
            });
        }

        let requested = num_players * cards_per_player;
        if requested > self.remaining() {
            return Err(DeckError::Exhausted {
                requested,
                remaining: self.remaining(),
            });
        }

        let mut hands = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            let start = self.next;
            self.next += cards_per_player;
            hands.push(Hand::with_cards(self.cards[start..self.next].to_vec()));
        }

        Ok(Deal { hands, stock: self })
    }

    /// Drops every card for which `keep` returns false from the undealt part.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Card) -> bool,
    {
        let mut rest = self.cards.split_off(self.next);
        rest.retain(|card| keep(card));
        self.cards.extend(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, Deck};
    use crate::error::DeckError;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_40_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), DECK_SIZE);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert_eq!(deck.cards()[0], Card::new(Rank::As, Suit::Oros));
        assert_eq!(deck.cards()[5], Card::new(Rank::Dos, Suit::Copas));
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_hands_out_disjoint_hands_and_keeps_stock() {
        let deal = Deck::shuffled_with_seed(7).deal(4, 4).unwrap();
        assert_eq!(deal.hands.len(), 4);
        assert_eq!(deal.stock.remaining(), DECK_SIZE - 16);

        let mut seen = HashSet::new();
        for hand in &deal.hands {
            assert_eq!(hand.len(), 4);
            for card in hand.iter() {
                assert!(seen.insert(*card), "{card} dealt twice");
            }
        }
        for card in deal.stock.cards() {
            assert!(seen.insert(*card), "{card} both dealt and in stock");
        }
    }

    #[test]
    fn deal_follows_deck_order() {
        let deck = Deck::standard();
        let deal = deck.deal(2, 4).unwrap();
        assert_eq!(deal.hands[0].cards(), &Deck::standard().cards()[0..4]);
        assert_eq!(deal.hands[1].cards(), &Deck::standard().cards()[4..8]);
        assert_eq!(deal.stock.cards()[0], Deck::standard().cards()[8]);
    }

    #[test]
    fn deal_rejects_oversubscription() {
        let err = Deck::standard().deal(11, 4).unwrap_err();
        assert_eq!(
            err,
            DeckError::Exhausted {
                requested: 44,
                remaining: 40
            }
        );
        assert!(matches!(
            Deck::standard().deal(0, 4),
            Err(DeckError::InvalidDeal { .. })
        ));
    }

    #[test]
    fn draw_consumes_stock_in_order() {
        let mut stock = Deck::standard().deal(9, 4).unwrap().stock;
        assert_eq!(stock.remaining(), 4);
        assert_eq!(stock.draw(), Some(Card::new(Rank::Rey, Suit::Oros)));
        for _ in 0..3 {
            assert!(stock.draw().is_some());
        }
        assert!(stock.is_empty());
        assert_eq!(stock.draw(), None);
    }
}
