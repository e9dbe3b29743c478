//! # Selection Tracker
//!
//! The positions the player has marked in the current round, in the order they
//! were picked. Capacity equals the round's required position count; once full, a
//! new pick pushes out the oldest one (FIFO ring buffer).
//!
//! ## Toggle Rules
//! 1. Already selected: remove it, keeping the order of the rest
//! 2. Room left: append
//! 3. Full: evict index 0, append at the end
//!
//! `0 <= len <= capacity` holds after every call.

use crate::catalog::Position;
use serde::Serialize;
use std::collections::VecDeque;

/// What a single toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
    Replaced { evicted: Position },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTracker {
    capacity: usize,
    selected: VecDeque<Position>,
}

impl SelectionTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            selected: VecDeque::with_capacity(capacity),
        }
    }

    pub fn toggle(&mut self, position: Position) -> ToggleOutcome {
        if let Some(index) = self.selected.iter().position(|&p| p == position) {
            self.selected.remove(index);
            return ToggleOutcome::Removed;
        }

        if self.selected.len() < self.capacity {
            self.selected.push_back(position);
            return ToggleOutcome::Added;
        }

        match self.selected.pop_front() {
            Some(evicted) => {
                self.selected.push_back(position);
                ToggleOutcome::Replaced { evicted }
            }
            // Zero capacity: nothing can ever be selected
            None => ToggleOutcome::Removed,
        }
    }

    pub fn positions(&self) -> Vec<Position> {
        self.selected.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.selected.len() == self.capacity
    }
}
