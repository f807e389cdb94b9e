/// Decides who is mano for each simulated round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManoSchedule {
    /// Seat 0 is mano every round.
    Fixed,
    /// The mano moves one seat to the right after every round, as at a real table.
    Rotating { players: usize },
}

impl ManoSchedule {
    pub fn new(players: usize, rotate: bool) -> Self {
        if rotate && players > 0 {
            ManoSchedule::Rotating { players }
        } else {
            ManoSchedule::Fixed
        }
    }

    pub fn mano_for(self, round_index: usize) -> usize {
        match self {
            ManoSchedule::Fixed => 0,
            ManoSchedule::Rotating { players } => round_index % players,
        }
    }
}
