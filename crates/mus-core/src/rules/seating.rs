use crate::error::RuleError;
use crate::model::player::SeatingOrder;

/// Picks, among tied seats, the one reached first going round the table from the mano.
pub fn resolve_tie(tied: &[usize], mano: usize, player_count: usize) -> Result<usize, RuleError> {
    if tied.is_empty() {
        return Err(RuleError::EmptyTieSet);
    }
    if mano >= player_count {
        return Err(RuleError::InvalidManoIndex { mano, player_count });
    }
    if let Some(&index) = tied.iter().find(|&&index| index >= player_count) {
        return Err(RuleError::InvalidTieIndex {
            index,
            player_count,
        });
    }

    SeatingOrder::from_mano(mano, player_count)
        .find(|seat| tied.contains(seat))
        .ok_or(RuleError::EmptyTieSet)
}
