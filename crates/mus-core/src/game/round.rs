use crate::error::{DeckError, RuleError};
use crate::model::deck::{DECK_SIZE, Deal, Deck};
use crate::model::hand::{HAND_SIZE, Hand};
use crate::rules::{self, RoundOutcome};
use thiserror::Error;

/// Largest table a single deck can deal four cards to.
pub const MAX_PLAYERS: usize = DECK_SIZE / HAND_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("player {player} is not seated at a table of {player_count}")]
    UnknownPlayer { player: usize, player_count: usize },
    #[error("invalid discard: {0}")]
    InvalidDiscard(&'static str),
}

/// A player's answer when asked for mus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusVote {
    Mus,
    Corta,
}

impl MusVote {
    /// Only an explicit "y" asks for mus; anything else cuts.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("y") {
            MusVote::Mus
        } else {
            MusVote::Corta
        }
    }
}

/// Mus is only given when nobody cuts.
pub fn mus_agreed<I>(votes: I) -> bool
where
    I: IntoIterator<Item = MusVote>,
{
    votes.into_iter().all(|vote| vote == MusVote::Mus)
}

/// One deal of mus: the hands at the table and the stock used to replace discards.
#[derive(Debug, Clone)]
pub struct MusRound {
    seed: u64,
    mano: usize,
    hands: Vec<Hand>,
    stock: Deck,
    mus_count: u32,
}

impl MusRound {
    pub fn new(num_players: usize, mano: usize) -> Result<Self, RoundError> {
        let seed: u64 = rand::random();
        Self::with_seed(seed, num_players, mano)
    }

    pub fn with_seed(seed: u64, num_players: usize, mano: usize) -> Result<Self, RoundError> {
        check_seating(num_players, mano)?;
        let Deal { hands, stock } = Deck::shuffled_with_seed(seed).deal(num_players, HAND_SIZE)?;
        Ok(Self {
            seed,
            mano,
            hands,
            stock,
            mus_count: 0,
        })
    }

    /// Rebuilds a round from hands already on the table. The stock is the
    /// seeded deck minus every card currently held.
    pub fn from_hands(seed: u64, mano: usize, hands: Vec<Hand>) -> Result<Self, RoundError> {
        rules::check_table(&hands, mano)?;
        let mut stock = Deck::shuffled_with_seed(seed);
        stock.retain(|card| !hands.iter().any(|hand| hand.contains(*card)));
        Ok(Self {
            seed,
            mano,
            hands,
            stock,
            mus_count: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mano(&self) -> usize {
        self.mano
    }

    pub fn player_count(&self) -> usize {
        self.hands.len()
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, player: usize) -> Option<&Hand> {
        self.hands.get(player)
    }

    pub fn stock_remaining(&self) -> usize {
        self.stock.remaining()
    }

    /// Number of times every player asked for mus and discarded.
    pub fn mus_count(&self) -> u32 {
        self.mus_count
    }

    pub fn record_mus(&mut self) {
        self.mus_count += 1;
    }

    /// Replaces the cards at `positions` (0-based) with cards from the stock,
    /// in the order given. Stops early once the stock is empty and reports how
    /// many cards were actually replaced.
    pub fn discard(&mut self, player: usize, positions: &[usize]) -> Result<usize, RoundError> {
        let player_count = self.hands.len();
        validate_discard(positions)?;
        let hand = self
            .hands
            .get_mut(player)
            .ok_or(RoundError::UnknownPlayer {
                player,
                player_count,
            })?;

        let mut replaced = 0;
        for &position in positions {
            let Some(card) = self.stock.draw() else {
                break;
            };
            hand.replace(position, card);
            replaced += 1;
        }
        Ok(replaced)
    }

    pub fn evaluate(&self) -> Result<RoundOutcome, RuleError> {
        rules::evaluate_round(&self.hands, self.mano)
    }
}

fn check_seating(num_players: usize, mano: usize) -> Result<(), RuleError> {
    if num_players == 0 {
        return Err(RuleError::NoPlayers);
    }
    if mano >= num_players {
        return Err(RuleError::InvalidManoIndex {
            mano,
            player_count: num_players,
        });
    }
    Ok(())
}

fn validate_discard(positions: &[usize]) -> Result<(), RoundError> {
    if positions.is_empty() {
        return Err(RoundError::InvalidDiscard("at least one card must be discarded"));
    }
    if positions.len() > HAND_SIZE {
        return Err(RoundError::InvalidDiscard("at most 4 cards can be discarded"));
    }
    if positions.iter().any(|&position| position >= HAND_SIZE) {
        return Err(RoundError::InvalidDiscard("card position out of range"));
    }
    for (index, position) in positions.iter().enumerate() {
        if positions[..index].contains(position) {
            return Err(RoundError::InvalidDiscard("card discarded twice"));
        }
    }
    Ok(())
}
