//! # Rounds
//!
//! A round is one "find this note in N positions" prompt.
//!
//! ## Generation
//! [`generate_round`] draws from the injected [`RandomSource`]:
//! 1. The required count, uniformly from `1..=3`
//! 2. One position, uniformly from every catalog position; its note is the target
//!
//! Because the target comes from a position draw, notes that appear more often on
//! the board are asked more often. The draw does not check that the note appears
//! at least `target_positions` times. On boards where some note occurs fewer times
//! than that, the round cannot be won; see `NoteCatalog::occurrences`.
//!
//! ## Verdict Lifecycle
//! `Unknown` until the round is confirmed, then `Correct` or `Incorrect` once.
//! Editing the selection resets it to `Unknown`.

use crate::catalog::{NoteCatalog, Position};
use crate::pitch::PitchClass;
use crate::ports::RandomSource;
use crate::selection::{SelectionTracker, ToggleOutcome};
use serde::Serialize;

pub const MIN_TARGET_POSITIONS: usize = 1;
pub const MAX_TARGET_POSITIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn is_resolved(self) -> bool {
        self != Verdict::Unknown
    }
}

/// The outcome of one draw: what to find and how many times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSpec {
    pub target_note: PitchClass,
    pub target_positions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    target_note: PitchClass,
    target_positions: usize,
    selection: SelectionTracker,
    verdict: Verdict,
}

impl Round {
    pub fn new(spec: RoundSpec) -> Self {
        Self {
            target_note: spec.target_note,
            target_positions: spec.target_positions,
            selection: SelectionTracker::new(spec.target_positions),
            verdict: Verdict::Unknown,
        }
    }

    pub fn target_note(&self) -> PitchClass {
        self.target_note
    }

    pub fn target_positions(&self) -> usize {
        self.target_positions
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn toggle(&mut self, position: Position) -> ToggleOutcome {
        self.verdict = Verdict::Unknown;
        self.selection.toggle(position)
    }

    /// Store the verdict of a confirmation. Returns `false` (and changes nothing)
    /// if the round already has one.
    pub fn resolve(&mut self, verdict: Verdict) -> bool {
        if self.verdict.is_resolved() {
            return false;
        }
        self.verdict = verdict;
        true
    }
}

/// Draw the next round's target
pub fn generate_round(catalog: &NoteCatalog, random: &mut dyn RandomSource) -> RoundSpec {
    let positions: Vec<Position> = catalog.positions().collect();
    let span = MAX_TARGET_POSITIONS - MIN_TARGET_POSITIONS + 1;
    let target_positions = MIN_TARGET_POSITIONS + random.pick(span);

    // `from_tuning` never builds an empty catalog
    let target_note = if positions.is_empty() {
        PitchClass::C
    } else {
        let index = random.pick(positions.len());
        catalog.note_at(positions[index]).unwrap_or(PitchClass::C)
    };

    RoundSpec {
        target_note,
        target_positions,
    }
}
