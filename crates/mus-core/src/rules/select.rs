use core::cmp::Ordering;

use super::seating::resolve_tie;
use crate::error::RuleError;

/// Narrows the table down to one winner.
///
/// `keys[i]` is the derived value for seat `i`. Seats failing `qualifies` are
/// out of the contest; among the rest, `compare(a, b) == Greater` means `a`
/// beats `b`. Every seat equal to the best key is tied, and the tie goes to the
/// seat closest to the mano. Returns `None` when nobody qualifies.
pub(crate) fn select_winner<K, Q, C>(
    keys: &[K],
    mano: usize,
    qualifies: Q,
    compare: C,
) -> Result<Option<usize>, RuleError>
where
    Q: Fn(&K) -> bool,
    C: Fn(&K, &K) -> Ordering,
{
    let best = keys
        .iter()
        .filter(|key| qualifies(*key))
        .reduce(|best, key| match compare(key, best) {
            Ordering::Greater => key,
            _ => best,
        });
    let Some(best) = best else {
        return Ok(None);
    };

    let tied: Vec<usize> = keys
        .iter()
        .enumerate()
        .filter(|(_, key)| qualifies(*key) && compare(*key, best) == Ordering::Equal)
        .map(|(seat, _)| seat)
        .collect();

    resolve_tie(&tied, mano, keys.len()).map(Some)
}
