use super::points::points;
use super::select::select_winner;
use super::{check_table, per_seat};
use crate::error::{HandDefect, RuleError};
use crate::model::hand::Hand;

pub const JUEGO_THRESHOLD: u8 = 31;

/// Juego totals from best to worst. La una and la dos beat every higher total.
pub const JUEGO_ORDER: [u8; 10] = [31, 32, 40, 39, 38, 37, 36, 35, 34, 33];

const MIN_TOTAL: u8 = 4;
const MAX_TOTAL: u8 = 40;

/// Sum of the juego points of a four-card hand.
pub fn hand_total(hand: &Hand) -> Result<u8, HandDefect> {
    if !hand.is_complete() {
        return Err(HandDefect::CardCount(hand.len()));
    }
    let total: u8 = hand.iter().map(|card| points(card.normalized_rank())).sum();
    if !(MIN_TOTAL..=MAX_TOTAL).contains(&total) {
        return Err(HandDefect::PointTotal(total));
    }
    Ok(total)
}

pub const fn has_juego(total: u8) -> bool {
    total >= JUEGO_THRESHOLD
}

/// Position of `total` in [`JUEGO_ORDER`]; lower is better. `None` below 31.
pub fn juego_rank(total: u8) -> Option<usize> {
    JUEGO_ORDER.iter().position(|&candidate| candidate == total)
}

pub fn evaluate_juego(hands: &[Hand], mano: usize) -> Result<Option<usize>, RuleError> {
    check_table(hands, mano)?;
    let totals = per_seat(hands, hand_total)?;
    select_winner(
        &totals,
        mano,
        |total| has_juego(*total),
        |a, b| juego_rank(*b).cmp(&juego_rank(*a)),
    )
}

/// Highest plain total wins. Only meaningful when nobody holds juego.
pub fn evaluate_punto(hands: &[Hand], mano: usize) -> Result<usize, RuleError> {
    check_table(hands, mano)?;
    let totals = per_seat(hands, hand_total)?;
    select_winner(&totals, mano, |_| true, |a, b| a.cmp(b))?.ok_or(RuleError::NoPlayers)
}

#[cfg(test)]
mod tests {
    use super::{JUEGO_ORDER, evaluate_juego, evaluate_punto, hand_total, has_juego, juego_rank};
    use crate::error::HandDefect;
    use crate::model::hand::Hand;
    use crate::rules::fixtures::{hand, table};

    #[test]
    fn totals_count_figures_and_treses_as_ten() {
        assert_eq!(hand_total(&hand([12, 11, 10, 1])), Ok(31));
        assert_eq!(hand_total(&hand([3, 3, 3, 3])), Ok(40));
        assert_eq!(hand_total(&hand([2, 1, 2, 1])), Ok(4));
        assert_eq!(hand_total(&hand([7, 6, 5, 4])), Ok(22));
    }

    #[test]
    fn incomplete_hand_has_no_total() {
        assert_eq!(hand_total(&Hand::new()), Err(HandDefect::CardCount(0)));
    }

    #[test]
    fn preference_table_is_not_numeric() {
        assert_eq!(juego_rank(31), Some(0));
        assert_eq!(juego_rank(32), Some(1));
        assert_eq!(juego_rank(40), Some(2));
        assert_eq!(juego_rank(33), Some(9));
        assert_eq!(juego_rank(30), None);
        for total in 31..=40 {
            assert!(has_juego(total));
            assert!(JUEGO_ORDER.contains(&total));
        }
        assert!(!has_juego(30));
    }

    #[test]
    fn la_una_beats_forty() {
        let hands = table(&[[12, 12, 12, 12], [12, 11, 10, 1], [7, 6, 5, 4]]);
        assert_eq!(evaluate_juego(&hands, 0), Ok(Some(1)));
    }

    #[test]
    fn thirty_two_beats_forty_and_forty_beats_thirty_three() {
        let hands = table(&[[12, 11, 10, 3], [12, 11, 7, 6], [10, 10, 10, 2]]);
        // Totals: 40, 33, 31.
        assert_eq!(evaluate_juego(&hands, 0), Ok(Some(2)));

        let hands = table(&[[12, 11, 10, 3], [12, 11, 7, 6], [10, 10, 6, 6]]);
        // Totals: 40, 33, 32.
        assert_eq!(evaluate_juego(&hands, 0), Ok(Some(2)));

        let hands = table(&[[12, 11, 7, 6], [12, 11, 10, 3]]);
        assert_eq!(evaluate_juego(&hands, 0), Ok(Some(1)));
    }

    #[test]
    fn equal_juego_totals_go_to_seating_order() {
        let hands = table(&[[12, 11, 10, 1], [5, 6, 7, 4], [3, 11, 10, 2]]);
        assert_eq!(evaluate_juego(&hands, 0), Ok(Some(0)));
        assert_eq!(evaluate_juego(&hands, 1), Ok(Some(2)));
    }

    #[test]
    fn no_juego_below_thirty_one() {
        let hands = table(&[[12, 11, 7, 1], [10, 10, 5, 4], [7, 6, 5, 4]]);
        // Totals: 28, 29, 22.
        assert_eq!(evaluate_juego(&hands, 0), Ok(None));
        assert_eq!(evaluate_punto(&hands, 0), Ok(1));
    }

    #[test]
    fn punto_ties_follow_seating() {
        let hands = table(&[[12, 11, 7, 1], [10, 10, 7, 1], [4, 4, 4, 4]]);
        assert_eq!(evaluate_punto(&hands, 0), Ok(0));
        assert_eq!(evaluate_punto(&hands, 1), Ok(1));
        assert_eq!(evaluate_punto(&hands, 2), Ok(0));
    }
}
