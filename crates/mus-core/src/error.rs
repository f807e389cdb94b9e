use thiserror::Error;

/// What is wrong with a hand that cannot be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandDefect {
    #[error("holds {0} cards instead of 4")]
    CardCount(usize),
    #[error("totals {0} points, outside 4..=40")]
    PointTotal(u8),
}

/// Failures raised by the evaluators. All of them are fatal to the call that
/// produced them; "nobody has pares/juego" is reported as `None`, not here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("hand of player {player} {defect}")]
    MalformedHand { player: usize, defect: HandDefect },
    #[error("rank {0} is not part of the Spanish deck")]
    InvalidRank(u8),
    #[error("tie-break requested with no tied players")]
    EmptyTieSet,
    #[error("tied player {index} is not seated at a table of {player_count}")]
    InvalidTieIndex { index: usize, player_count: usize },
    #[error("mano {mano} is not seated at a table of {player_count}")]
    InvalidManoIndex { mano: usize, player_count: usize },
    #[error("no hands to evaluate")]
    NoPlayers,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot deal {requested} cards from a deck holding {remaining}")]
    Exhausted { requested: usize, remaining: usize },
    #[error("cannot deal {cards_per_player} cards to each of {num_players} players")]
    InvalidDeal {
        num_players: usize,
        cards_per_player: usize,
    },
}
