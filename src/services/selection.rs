//! Selection pipeline: filter candidates against the ban list, then pick
//! one survivor uniformly at random.
//!
//! Everything here is pure — no network, no store mutation. Randomness is
//! injected so tests can drive the pick deterministically.

use crate::models::{BanList, Photo};
use rand::Rng;

/// Outcome of one selection pass over a candidate list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    /// One survivor, chosen uniformly at random.
    Selected(Photo),
    /// Every candidate was excluded by the ban list.
    Empty,
}

impl SelectionResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionResult::Empty)
    }
}

/// Candidates that pass all three negative membership tests.
///
/// A photo survives when its camera name, rover launch date, and earth
/// date are each absent from the corresponding ban set.
pub fn survivors<'a>(candidates: &'a [Photo], bans: &BanList) -> Vec<&'a Photo> {
    candidates.iter().filter(|p| bans.allows(p)).collect()
}

/// Filter `candidates` against `bans` and pick one survivor with `rng`.
///
/// Each survivor is equally likely. Returns [`SelectionResult::Empty`]
/// when the filter leaves nothing.
pub fn select_with<R: Rng>(candidates: &[Photo], bans: &BanList, rng: &mut R) -> SelectionResult {
    let pool = survivors(candidates, bans);
    if pool.is_empty() {
        return SelectionResult::Empty;
    }
    let index = rng.gen_range(0..pool.len());
    SelectionResult::Selected(pool[index].clone())
}

/// [`select_with`] over the thread-local RNG.
pub fn select(candidates: &[Photo], bans: &BanList) -> SelectionResult {
    select_with(candidates, bans, &mut rand::thread_rng())
}
