//! Winner determination for the lances of mus.
//!
//! Every evaluator borrows the table's hands, validates them up front and
//! returns the index of the winning seat. Grande, chica and punto always have a
//! winner; pares and juego return `None` when nobody holds a play.

mod grande;
mod juego;
mod lance;
mod pares;
mod points;
mod round;
mod seating;
mod select;

pub use grande::{chica_profile, evaluate_chica, evaluate_grande, grande_profile};
pub use juego::{
    JUEGO_ORDER, JUEGO_THRESHOLD, evaluate_juego, evaluate_punto, hand_total, has_juego,
    juego_rank,
};
pub use lance::Lance;
pub use pares::{ParesProfile, classify_pares, evaluate_pares};
pub use points::{normalize, points};
pub use round::{JuegoOutcome, RoundOutcome, evaluate_round};
pub use seating::resolve_tie;

use crate::error::{HandDefect, RuleError};
use crate::model::hand::{HAND_SIZE, Hand};

/// Rejects an empty table, a mano outside it, or any hand without exactly four cards.
pub(crate) fn check_table(hands: &[Hand], mano: usize) -> Result<(), RuleError> {
    if hands.is_empty() {
        return Err(RuleError::NoPlayers);
    }
    if mano >= hands.len() {
        return Err(RuleError::InvalidManoIndex {
            mano,
            player_count: hands.len(),
        });
    }
    for (player, hand) in hands.iter().enumerate() {
        if !hand.is_complete() {
            return Err(RuleError::MalformedHand {
                player,
                defect: HandDefect::CardCount(hand.len()),
            });
        }
    }
    Ok(())
}

pub(crate) fn normalized_ranks(hand: &Hand) -> Result<[u8; HAND_SIZE], HandDefect> {
    if !hand.is_complete() {
        return Err(HandDefect::CardCount(hand.len()));
    }
    let mut ranks = [0u8; HAND_SIZE];
    for (slot, card) in ranks.iter_mut().zip(hand.iter()) {
        *slot = card.normalized_rank();
    }
    Ok(ranks)
}

/// Applies a per-hand derivation to every seat, tagging failures with the seat.
pub(crate) fn per_seat<T, F>(hands: &[Hand], derive: F) -> Result<Vec<T>, RuleError>
where
    F: Fn(&Hand) -> Result<T, HandDefect>,
{
    hands
        .iter()
        .enumerate()
        .map(|(player, hand)| {
            derive(hand).map_err(|defect| RuleError::MalformedHand { player, defect })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::suit::Suit;

    /// Builds a hand from raw ranks, cycling suits so cards stay distinct enough to read.
    pub fn hand(ranks: [u8; 4]) -> Hand {
        let cards = ranks
            .iter()
            .zip(Suit::ALL.iter())
            .map(|(&rank, &suit)| Card::from_raw(rank, suit).expect("legal rank"))
            .collect();
        Hand::with_cards(cards)
    }

    pub fn table(hands: &[[u8; 4]]) -> Vec<Hand> {
        hands.iter().copied().map(hand).collect()
    }
}
