//! # Answer Evaluator
//!
//! Decides whether a confirmed selection answers the round:
//! every selected position must sound the target note, and exactly the required
//! number of positions must be selected.

use crate::catalog::{NoteCatalog, Position};
use crate::pitch::PitchClass;

/// `true` iff `selected` has exactly `target_positions` entries and every one of
/// them resolves to `target`. Positions missing from the catalog count as wrong.
///
/// Callers treat an empty selection as "nothing to confirm" and never reach this.
pub fn evaluate(
    catalog: &NoteCatalog,
    target: PitchClass,
    target_positions: usize,
    selected: &[Position],
) -> bool {
    selected.len() == target_positions
        && selected
            .iter()
            .all(|&position| catalog.note_at(position) == Some(target))
}
