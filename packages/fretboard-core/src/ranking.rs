//! # Ranking Store
//!
//! Top-10 list of finished sessions, persisted as JSON under one storage key.
//!
//! ## Ordering
//! Score descending, then time spent ascending. Sorting is stable, so a new entry
//! tied with an existing one on both keys lands after it. Lists read back from
//! storage are re-sorted, so indexes always refer to display order.
//!
//! ## Storage Format
//! ```json
//! [{"playerName":"Ana","score":12,"date":"2026-10-14T12:00:00.000Z","timeSpent":60}]
//! ```
//!
//! Missing or unparsable data loads as an empty list. Write failures are logged and
//! the in-memory result is still returned, so a broken store never interrupts play.

use crate::error::FretboardError;
use crate::ports::Storage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

pub const RANKING_STORAGE_KEY: &str = "bassRanking";
pub const MAX_RANKING_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub player_name: String,
    pub score: u32,
    /// ISO-8601 timestamp of when the entry was saved
    pub date: String,
    /// Seconds played
    pub time_spent: u32,
}

pub struct RankingStore<S: Storage> {
    storage: S,
}

impl<S: Storage> RankingStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Vec<RankingEntry> {
        let Some(raw) = self.storage.get(RANKING_STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<RankingEntry>>(&raw) {
            Ok(mut entries) => {
                sort_entries(&mut entries);
                entries
            }
            Err(e) => {
                debug!("Ignoring unreadable ranking data: {}", e);
                Vec::new()
            }
        }
    }

    pub fn insert(&mut self, entry: RankingEntry) -> Vec<RankingEntry> {
        let mut entries = self.load();
        entries.push(entry);
        sort_entries(&mut entries);
        entries.truncate(MAX_RANKING_ENTRIES);
        self.persist(&entries);
        entries
    }

    /// Replace the name at `index`. Blank names and out-of-range indexes leave the
    /// list untouched. Returns whether anything changed.
    pub fn rename(&mut self, index: usize, new_name: &str) -> bool {
        let name = new_name.trim();
        if name.is_empty() {
            return false;
        }
        let mut entries = self.load();
        let Some(entry) = entries.get_mut(index) else {
            return false;
        };
        entry.player_name = name.to_string();
        self.persist(&entries);
        true
    }

    /// Whether a result would make it into the current list
    pub fn would_rank(&self, score: u32, time_spent: u32) -> bool {
        let entries = self.load();
        if entries.len() < MAX_RANKING_ENTRIES {
            return true;
        }
        entries
            .last()
            .map(|last| sort_key(score, time_spent) < sort_key(last.score, last.time_spent))
            .unwrap_or(true)
    }

    fn persist(&mut self, entries: &[RankingEntry]) {
        if let Err(e) = self.try_persist(entries) {
            warn!("Could not persist ranking: {}", e);
        }
    }

    fn try_persist(&mut self, entries: &[RankingEntry]) -> Result<(), FretboardError> {
        let encoded = serde_json::to_string(entries)?;
        self.storage.set(RANKING_STORAGE_KEY, &encoded)
    }
}

fn sort_key(score: u32, time_spent: u32) -> (Reverse<u32>, u32) {
    (Reverse(score), time_spent)
}

fn sort_entries(entries: &mut [RankingEntry]) {
    entries.sort_by_key(|e| sort_key(e.score, e.time_spent));
}

/// `"45s"`, or `"1m 5s"` from a minute up
pub fn format_time_spent(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, remaining)
    } else {
        format!("{}s", remaining)
    }
}
