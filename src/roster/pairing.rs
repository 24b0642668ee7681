//! Random matchup selection

use crate::types::{Character, Matchup};
use rand::seq::index;
use rand::Rng;

/// Pick two distinct characters uniformly at random
///
/// Returns `None` when fewer than two characters are registered. The order of
/// the returned pair is random too, so neither side is favoured.
pub fn pick<R: Rng + ?Sized>(characters: &[Character], rng: &mut R) -> Option<Matchup> {
    if characters.len() < 2 {
        return None;
    }

    let picked = index::sample(rng, characters.len(), 2);
    Some(Matchup {
        left: characters[picked.index(0)].id.clone(),
        right: characters[picked.index(1)].id.clone(),
    })
}
