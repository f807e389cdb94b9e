use super::select::select_winner;
use super::{check_table, normalized_ranks, per_seat};
use crate::error::{HandDefect, RuleError};
use crate::model::hand::{HAND_SIZE, Hand};

/// Normalized ranks from highest to lowest; compared card by card for grande.
pub fn grande_profile(hand: &Hand) -> Result<[u8; HAND_SIZE], HandDefect> {
    let mut ranks = normalized_ranks(hand)?;
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    Ok(ranks)
}

/// Normalized ranks from lowest to highest; compared card by card for chica.
pub fn chica_profile(hand: &Hand) -> Result<[u8; HAND_SIZE], HandDefect> {
    let mut ranks = normalized_ranks(hand)?;
    ranks.sort_unstable();
    Ok(ranks)
}

pub fn evaluate_grande(hands: &[Hand], mano: usize) -> Result<usize, RuleError> {
    check_table(hands, mano)?;
    let profiles = per_seat(hands, grande_profile)?;
    select_winner(&profiles, mano, |_| true, |a, b| a.cmp(b))?.ok_or(RuleError::NoPlayers)
}

pub fn evaluate_chica(hands: &[Hand], mano: usize) -> Result<usize, RuleError> {
    check_table(hands, mano)?;
    let profiles = per_seat(hands, chica_profile)?;
    select_winner(&profiles, mano, |_| true, |a, b| b.cmp(a))?.ok_or(RuleError::NoPlayers)
}
