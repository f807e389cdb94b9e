/// Seats around a mus table are numbered `0..player_count`. Iterates every
/// seat once, starting at the mano and wrapping past the last seat.
#[derive(Debug, Clone)]
pub struct SeatingOrder {
    mano: usize,
    player_count: usize,
    step: usize,
}

impl SeatingOrder {
    pub const fn from_mano(mano: usize, player_count: usize) -> Self {
        Self {
            mano,
            player_count,
            step: 0,
        }
    }
}

impl Iterator for SeatingOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step >= self.player_count {
            return None;
        }
        let seat = (self.mano + self.step) % self.player_count;
        self.step += 1;
        Some(seat)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.player_count - self.step.min(self.player_count);
        (left, Some(left))
    }
}

impl ExactSizeIterator for SeatingOrder {}
