//! # Collaborator Ports
//!
//! The session never touches ambient browser or OS services. Everything it needs
//! from the outside world comes through one of these traits, handed over at
//! construction:
//!
//! | Port | Used for | Default implementation |
//! |---|---|---|
//! | [`Storage`] | Persisted ranking list | [`MemoryStorage`] |
//! | [`Scheduler`] | 1 s tick, post-confirm reveal delay | [`VirtualScheduler`](crate::VirtualScheduler) |
//! | [`AudioSink`] | Note playback | [`SilentAudio`] |
//! | [`Clock`] | Ranking timestamps | [`SystemClock`] |
//! | [`RandomSource`] | Round generation | [`RngSource`] |
//!
//! Implementations that tests need to inspect after handing them over
//! ([`MemoryStorage`], [`RecordingAudio`]) share their state between clones.

use crate::error::FretboardError;
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

/// Playback length of one note: an eighth at 120 BPM
pub const NOTE_DURATION: Duration = Duration::from_millis(250);

/// Key-value string store
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FretboardError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FretboardError> {
        (**self).set(key, value)
    }
}

/// Handle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u64);

/// One-shot delayed tasks. The owner of the scheduler calls back into the session
/// with the task's id once it is due.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TaskId;
    fn cancel(&mut self, id: TaskId);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, delay: Duration) -> TaskId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, id: TaskId) {
        (**self).cancel(id)
    }
}

pub trait AudioSink {
    fn play_frequency(&mut self, frequency: f64, duration: Duration) -> Result<(), FretboardError>;
}

pub trait Clock {
    /// Current time as an ISO-8601 string
    fn now_iso(&self) -> String;
}

/// Uniform index source for round generation
pub trait RandomSource {
    /// An index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// In-memory [`Storage`]; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-loaded with one key, without counting it as a write
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of successful `set` calls so far
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.raw(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FretboardError> {
        let mut inner = self.inner.borrow_mut();
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_frequency(&mut self, _frequency: f64, _duration: Duration) -> Result<(), FretboardError> {
        Ok(())
    }
}

/// [`AudioSink`] that remembers every requested frequency; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<f64>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<f64> {
        self.played.borrow().clone()
    }

    /// Return and forget everything requested so far
    pub fn take(&self) -> Vec<f64> {
        std::mem::take(&mut *self.played.borrow_mut())
    }
}

impl AudioSink for RecordingAudio {
    fn play_frequency(&mut self, frequency: f64, _duration: Duration) -> Result<(), FretboardError> {
        self.played.borrow_mut().push(frequency);
        Ok(())
    }
}

/// UTC wall clock, formatted like `2026-10-14T12:00:00.000Z`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Clock that always reports the same instant
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.0.clone()
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Replays a fixed sequence of draws (each reduced modulo `len`), then repeats the
/// last one. Returns 0 when constructed empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<usize>,
    last: usize,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            last: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        if let Some(next) = self.draws.pop_front() {
            self.last = next;
        }
        self.last % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_memory_storage_shares_state_between_clones() {
        let storage = MemoryStorage::new();
        let mut handle = storage.clone();
        handle.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        assert_eq!(storage.writes(), 1);
        assert_eq!(MemoryStorage::with_value("k", "v").writes(), 0);
    }

    #[test]
    fn test_rng_source_stays_in_range() {
        let mut source = RngSource(StdRng::seed_from_u64(7));
        for len in 1..50 {
            assert!(source.pick(len) < len);
        }
    }

    #[test]
    fn test_scripted_random_repeats_last_draw() {
        let mut source = ScriptedRandom::new([4, 1]);
        assert_eq!(source.pick(3), 1);
        assert_eq!(source.pick(10), 1);
        assert_eq!(source.pick(10), 1);
        assert_eq!(ScriptedRandom::default().pick(5), 0);
    }

    #[test]
    fn test_system_clock_format() {
        let now = SystemClock.now_iso();
        assert!(now.ends_with('Z'), "{}", now);
        assert_eq!(now.len(), "2026-10-14T12:00:00.000Z".len());
    }
}
