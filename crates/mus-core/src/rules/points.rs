use crate::error::RuleError;
use crate::model::rank::Rank;

/// Effective comparison value of a raw rank: 3 plays as 12, 2 plays as 1.
pub fn normalize(rank: u8) -> Result<u8, RuleError> {
    Rank::try_from(rank).map(|rank| rank.normalized().value())
}

/// Juego value of a normalized rank. Sota, caballo and rey are worth ten.
pub const fn points(normalized_rank: u8) -> u8 {
    if normalized_rank >= 10 {
        10
    } else {
        normalized_rank
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, points};
    use crate::error::RuleError;
    use crate::model::rank::Rank;

    #[test]
    fn folds_three_and_two() {
        assert_eq!(normalize(3), Ok(12));
        assert_eq!(normalize(2), Ok(1));
        assert_eq!(normalize(7), Ok(7));
        assert_eq!(normalize(11), Ok(11));
    }

    #[test]
    fn rejects_ranks_outside_the_deck() {
        for raw in [0, 8, 9, 13, 255] {
            assert_eq!(normalize(raw), Err(RuleError::InvalidRank(raw)));
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for rank in Rank::ORDERED {
            let once = normalize(rank.value()).unwrap();
            assert_eq!(normalize(once), Ok(once));
        }
    }

    #[test]
    fn face_cards_count_ten() {
        assert_eq!(points(12), 10);
        assert_eq!(points(10), 10);
        assert_eq!(points(7), 7);
        assert_eq!(points(1), 1);
    }
}
