//! # Session Module
//!
//! The timed game: round lifecycle, scoring, countdown and ranking hand-off.
//!
//! ## Sub-modules
//! - `command` - [`Command`], everything the presentation layer can ask for
//! - `controller` - [`SessionController`], the state machine
//! - `snapshot` - [`Snapshot`], what the presentation layer renders after each step
//!
//! ## States
//! ```text
//!            start                  confirm              reveal delay
//!   Idle ───────────▶ Active ──────────────▶ RoundResolved ──────────▶ Active
//!    ▲                 │  │                        │
//!    │       stop      │  │ tick (time hits 0)     │ tick (time hits 0)
//!    ├─────────────────┘  ▼                        ▼
//!    │               ┌──────────────────────────────┐
//!    └───────────────│            Ended             │
//!      submit_name   └──────────────────────────────┘
//! ```
//!
//! - `RoundResolved` is the short reveal after a confirmation. The verdict stays on
//!   screen, selection is frozen, and the timer keeps running.
//! - Only a natural timer expiry leads to `Ended`, and only `Ended` writes to the
//!   ranking (when the player gives a name).
//! - `start` works from every state and always cancels the previous session's
//!   pending tick and reveal first.
//!
//! ## Time
//! The controller never sleeps or reads a clock to advance the game. It asks the
//! [`Scheduler`](crate::Scheduler) port for a tick every second and for one reveal
//! delay per confirmation, and moves only when the driver hands a due id back
//! through [`SessionController::fire`]. Ids of cancelled or superseded tasks are
//! ignored, so a late callback can never resurrect a stopped session.
//!
//! ## Example
//! ```rust
//! use fretboard::{
//!     Command, GameConfig, NoteCatalog, Phase, SessionController, SessionPorts,
//!     VirtualScheduler,
//! };
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let ports = SessionPorts::in_memory(scheduler.clone());
//! let mut game = SessionController::new(NoteCatalog::standard_bass(), GameConfig::default(), ports);
//!
//! game.dispatch(Command::Start { time_budget: 10 });
//! assert_eq!(game.phase(), Phase::Active);
//!
//! scheduler.advance(Duration::from_secs(10), |id| {
//!     game.fire(id);
//! });
//! assert_eq!(game.phase(), Phase::Ended);
//! ```

mod command;
mod controller;
mod snapshot;


pub use command::Command;
pub use controller::{Phase, Session, SessionController, SessionPorts, SessionResult};
pub use snapshot::{RoundView, SelectedView, Snapshot};
