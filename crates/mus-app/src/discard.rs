use mus_core::model::hand::HAND_SIZE;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscardInputError {
    #[error("'{0}' is not a card number")]
    NotANumber(String),
    #[error("Invalid card number {0}")]
    OutOfRange(usize),
    #[error("Card {0} listed twice")]
    Duplicate(usize),
}

/// Parses a comma-separated list of 1-based card numbers ("1,3") into
/// 0-based hand positions, keeping the order typed. Distinct numbers in
/// `1..=4` bound the list to at most four cards.
pub fn parse_discard(input: &str) -> Result<Vec<usize>, DiscardInputError> {
    let mut positions = Vec::with_capacity(HAND_SIZE);
    for token in input.split(',') {
        let token = token.trim();
        let number: usize = token
            .parse()
            .map_err(|_| DiscardInputError::NotANumber(token.to_string()))?;
        if !(1..=HAND_SIZE).contains(&number) {
            return Err(DiscardInputError::OutOfRange(number));
        }
        if positions.contains(&(number - 1)) {
            return Err(DiscardInputError::Duplicate(number));
        }
        positions.push(number - 1);
    }
    Ok(positions)
}
