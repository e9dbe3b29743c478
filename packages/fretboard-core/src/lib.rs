//! # Fretboard
//!
//! Engine of the Bassfret fretboard-recognition game: find a note in N positions on
//! a bass neck before the clock runs out.
//!
//! ## Modules
//! - `pitch` - Pitch classes, octaves, equal-tempered frequencies
//! - `catalog` - The fretboard: which note and frequency sits at each position
//! - `round` - Round targets, verdicts and the random round generator
//! - `selection` - FIFO-bounded set of picked positions
//! - `evaluator` - Is a selection a correct answer?
//! - `ranking` - Persisted top-10
//! - `session` - The timed state machine tying everything together
//! - `ports` - Traits for storage, scheduling, audio, clock and randomness
//! - `scheduler` - Deterministic virtual scheduler
//! - `config` - YAML-loadable game settings
//!
//! The crate does no I/O of its own; front-ends supply the ports.

pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod pitch;
pub mod ports;
pub mod ranking;
pub mod round;
pub mod scheduler;
pub mod selection;
pub mod session;

pub use catalog::{CatalogEntry, NoteCatalog, Position, StringData};
pub use config::GameConfig;
pub use error::*;
pub use evaluator::evaluate;
pub use pitch::{Pitch, PitchClass};
pub use ports::{
    AudioSink, Clock, FixedClock, MemoryStorage, RandomSource, RecordingAudio, RngSource,
    Scheduler, ScriptedRandom, SilentAudio, Storage, SystemClock, TaskId, NOTE_DURATION,
};
pub use ranking::{format_time_spent, RankingEntry, RankingStore, RANKING_STORAGE_KEY};
pub use round::{generate_round, Round, RoundSpec, Verdict};
pub use scheduler::VirtualScheduler;
pub use selection::{SelectionTracker, ToggleOutcome};
pub use session::{
    Command, Phase, RoundView, SelectedView, Session, SessionController, SessionPorts,
    SessionResult, Snapshot,
};

/// Controller over the standard 4-string board with in-memory ports
pub fn standard_session(scheduler: VirtualScheduler) -> SessionController {
    SessionController::new(
        NoteCatalog::standard_bass(),
        GameConfig::default(),
        SessionPorts::in_memory(scheduler),
    )
}

/// Build a controller from a validated configuration
pub fn session_from_config(
    config: GameConfig,
    ports: SessionPorts,
) -> Result<SessionController, FretboardError> {
    config.validate()?;
    let catalog = config.build_catalog()?;
    Ok(SessionController::new(catalog, config, ports))
}
