use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

use super::select::select_winner;
use super::{check_table, normalized_ranks, per_seat};
use crate::error::{HandDefect, RuleError};
use crate::model::hand::{HAND_SIZE, Hand};

/// What a hand shows in the pares lance, with the normalized ranks that break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParesProfile {
    NoPares,
    /// One pair.
    Par(u8),
    /// Three of a kind; the odd card does not count.
    Medias(u8),
    /// Two distinct pairs, higher pair first.
    Duples(u8, u8),
}

impl ParesProfile {
    pub fn from_ranks(ranks: &[u8; HAND_SIZE]) -> Self {
        let mut counts = [0u8; 13];
        for &rank in ranks {
            counts[usize::from(rank)] += 1;
        }

        let mut pairs = counts
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, count)| **count == 2)
            .map(|(value, _)| value as u8);
        let high_pair = pairs.next();
        let low_pair = pairs.next();
        let triple = counts.iter().position(|&count| count == 3);

        // One value four times fits none of the shapes and scores nothing.
        match (triple, high_pair, low_pair) {
            (_, Some(high), Some(low)) => ParesProfile::Duples(high, low),
            (Some(value), ..) => ParesProfile::Medias(value as u8),
            (_, Some(value), None) => ParesProfile::Par(value),
            _ => ParesProfile::NoPares,
        }
    }

    /// 0 without pares, then 1 par, 2 medias, 3 duples.
    pub const fn strength(self) -> u8 {
        match self {
            ParesProfile::NoPares => 0,
            ParesProfile::Par(_) => 1,
            ParesProfile::Medias(_) => 2,
            ParesProfile::Duples(_, _) => 3,
        }
    }

    pub fn tie_values(self) -> Vec<u8> {
        match self {
            ParesProfile::NoPares => Vec::new(),
            ParesProfile::Par(value) | ParesProfile::Medias(value) => vec![value],
            ParesProfile::Duples(high, low) => vec![high, low],
        }
    }

    pub const fn has_pares(self) -> bool {
        !matches!(self, ParesProfile::NoPares)
    }

    /// Stronger tier first, then the higher tie values read left to right.
    pub fn compare(self, other: Self) -> Ordering {
        self.strength()
            .cmp(&other.strength())
            .then_with(|| self.tie_values().cmp(&other.tie_values()))
    }
}

pub fn classify_pares(hand: &Hand) -> Result<ParesProfile, HandDefect> {
    normalized_ranks(hand).map(|ranks| ParesProfile::from_ranks(&ranks))
}

pub fn evaluate_pares(hands: &[Hand], mano: usize) -> Result<Option<usize>, RuleError> {
    check_table(hands, mano)?;
    let profiles = per_seat(hands, classify_pares)?;
    select_winner(
        &profiles,
        mano,
        |profile| profile.has_pares(),
        |a, b| a.compare(*b),
    )
}
