//! Render-ready view of the session
//!
//! Selected positions carry their note only once the round has a verdict, so a
//! front-end that shows everything in the snapshot cannot give the answer away.

use super::controller::{Phase, SessionResult};
use crate::catalog::Position;
use crate::pitch::PitchClass;
use crate::ranking::RankingEntry;
use crate::round::Verdict;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub is_active: bool,
    pub score: u32,
    pub total_rounds: u32,
    pub time_remaining: u32,
    pub time_budget: u32,
    pub round: Option<RoundView>,
    /// Set while the session is `Ended` and waiting for a name
    pub result: Option<SessionResult>,
    pub ranking_open: bool,
    pub ranking: Vec<RankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub target_note: PitchClass,
    pub target_positions: usize,
    pub selected: Vec<SelectedView>,
    pub verdict: Verdict,
    /// The selection is complete and the round is still open
    pub can_confirm: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedView {
    pub position: Position,
    /// Pick order, starting at 1
    pub order: usize,
    pub revealed_note: Option<PitchClass>,
    pub matches_target: Option<bool>,
}
