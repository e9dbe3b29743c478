//! Session state machine
//!
//! Sole writer of session and round state. Every public method is one event:
//! a command from the player or a due task from the scheduler. Events that do not
//! fit the current phase are dropped and reported as `false`.

use super::command::Command;
use super::snapshot::{RoundView, SelectedView, Snapshot};
use crate::catalog::{NoteCatalog, Position};
use crate::config::GameConfig;
use crate::evaluator::evaluate;
use crate::ports::{
    AudioSink, Clock, MemoryStorage, RandomSource, RngSource, Scheduler, SilentAudio, Storage,
    SystemClock, TaskId, NOTE_DURATION,
};
use crate::ranking::{RankingEntry, RankingStore};
use crate::round::{generate_round, Round, Verdict};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Active,
    /// Reveal window after a confirmation; still counts as active
    RoundResolved,
    Ended,
}

impl Phase {
    /// The countdown is running
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Active | Phase::RoundResolved)
    }
}

/// Counters of the current (or last) session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub score: u32,
    pub total_rounds: u32,
    pub time_remaining: u32,
    pub time_budget: u32,
}

impl Session {
    fn started(time_budget: u32) -> Self {
        Self {
            score: 0,
            total_rounds: 0,
            time_remaining: time_budget,
            time_budget,
        }
    }

    pub fn time_spent(&self) -> u32 {
        self.time_budget - self.time_remaining
    }
}

/// Final numbers of a session that ran out of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub score: u32,
    pub total_rounds: u32,
    pub time_spent: u32,
}

/// Everything the controller needs from the outside world
pub struct SessionPorts {
    pub storage: Box<dyn Storage>,
    pub scheduler: Box<dyn Scheduler>,
    pub audio: Box<dyn AudioSink>,
    pub clock: Box<dyn Clock>,
    pub random: Box<dyn RandomSource>,
}

impl SessionPorts {
    /// Memory storage, no sound, wall clock and a fixed-seed generator around the
    /// given scheduler
    pub fn in_memory(scheduler: impl Scheduler + 'static) -> Self {
        Self {
            storage: Box::new(MemoryStorage::new()),
            scheduler: Box::new(scheduler),
            audio: Box::new(SilentAudio),
            clock: Box::new(SystemClock),
            random: Box::new(RngSource(StdRng::seed_from_u64(0))),
        }
    }
}

pub struct SessionController {
    catalog: NoteCatalog,
    config: GameConfig,
    ranking: RankingStore<Box<dyn Storage>>,
    scheduler: Box<dyn Scheduler>,
    audio: Box<dyn AudioSink>,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,

    phase: Phase,
    session: Session,
    round: Option<Round>,
    result: Option<SessionResult>,
    pending_tick: Option<TaskId>,
    pending_reveal: Option<TaskId>,
    ranking_open: bool,
    ranking_entries: Vec<RankingEntry>,
}

impl SessionController {
    pub fn new(catalog: NoteCatalog, config: GameConfig, ports: SessionPorts) -> Self {
        let ranking = RankingStore::new(ports.storage);
        let ranking_entries = ranking.load();
        Self {
            catalog,
            config,
            ranking,
            scheduler: ports.scheduler,
            audio: ports.audio,
            clock: ports.clock,
            random: ports.random,
            phase: Phase::Idle,
            session: Session::default(),
            round: None,
            result: None,
            pending_tick: None,
            pending_reveal: None,
            ranking_open: false,
            ranking_entries,
        }
    }

    pub fn catalog(&self) -> &NoteCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    pub fn ranking(&self) -> &[RankingEntry] {
        &self.ranking_entries
    }

    pub fn ranking_open(&self) -> bool {
        self.ranking_open
    }

    pub fn would_rank(&self, result: &SessionResult) -> bool {
        self.ranking.would_rank(result.score, result.time_spent)
    }

    /// Apply one command. Returns `false` when the command was ignored in the
    /// current phase. Playback side effects happen either way.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Start { time_budget } => self.start(time_budget),
            Command::Stop => self.stop(),
            Command::ToggleSelection(position) => self.toggle_selection(position),
            Command::Confirm => self.confirm(),
            Command::PlayTarget => self.play_target(),
            Command::SubmitName { name } => self.submit_name(&name),
            Command::RenameEntry { index, name } => self.rename_entry(index, &name),
            Command::ShowRanking => self.show_ranking(),
            Command::CloseRanking => self.close_ranking(),
        }
    }

    /// Begin a new session, abandoning whatever was going on before
    pub fn start(&mut self, time_budget: u32) -> bool {
        if time_budget == 0 {
            trace!("Ignoring start with an empty time budget");
            return false;
        }

        self.cancel_pending();
        self.session = Session::started(time_budget);
        self.result = None;
        self.next_round();
        self.phase = Phase::Active;
        self.pending_tick = Some(self.scheduler.schedule(self.config.tick_interval()));
        info!("Session started with {}s", time_budget);
        true
    }

    /// Abandon the running session without recording it
    pub fn stop(&mut self) -> bool {
        if !self.phase.is_active() {
            trace!("Ignoring stop in {:?}", self.phase);
            return false;
        }

        self.cancel_pending();
        self.round = None;
        self.phase = Phase::Idle;
        info!(
            "Session stopped at {}/{} with {}s left",
            self.session.score, self.session.total_rounds, self.session.time_remaining
        );
        true
    }

    /// Play the clicked position and, during a round, toggle it in the selection
    pub fn toggle_selection(&mut self, position: Position) -> bool {
        let Some(entry) = self.catalog.lookup(position) else {
            trace!("Ignoring toggle outside the board: {:?}", position);
            return false;
        };
        let frequency = entry.frequency;
        self.play(frequency);

        if self.phase != Phase::Active {
            trace!("Toggle in {:?} only plays the note", self.phase);
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };

        let outcome = round.toggle(position);
        debug!("Toggled {:?}: {:?}", position, outcome);
        true
    }

    /// Check the selection; needs exactly the required number of positions
    pub fn confirm(&mut self) -> bool {
        if self.phase != Phase::Active {
            trace!("Ignoring confirm in {:?}", self.phase);
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.selection().is_empty() || !round.selection().is_complete() {
            trace!(
                "Ignoring confirm with {}/{} positions",
                round.selection().len(),
                round.target_positions()
            );
            return false;
        }

        let correct = evaluate(
            &self.catalog,
            round.target_note(),
            round.target_positions(),
            &round.selection().positions(),
        );
        if !round.resolve(Verdict::from_correct(correct)) {
            return false;
        }

        self.session.total_rounds += 1;
        if correct {
            self.session.score += 1;
        }
        self.phase = Phase::RoundResolved;
        self.pending_reveal = Some(self.scheduler.schedule(self.config.reveal_delay()));
        debug!(
            "Round {} {} (score {})",
            self.session.total_rounds,
            if correct { "correct" } else { "incorrect" },
            self.session.score
        );
        true
    }

    /// Play the first position of the current target note
    pub fn play_target(&mut self) -> bool {
        let Some(round) = self.round.as_ref() else {
            trace!("No target to play");
            return false;
        };
        let Some(entry) = self
            .catalog
            .find_first(round.target_note())
            .and_then(|position| self.catalog.lookup(position))
        else {
            return false;
        };
        let frequency = entry.frequency;
        self.play(frequency);
        true
    }

    /// Leave `Ended`, recording the result when `name` is not blank
    pub fn submit_name(&mut self, name: &str) -> bool {
        if self.phase != Phase::Ended {
            trace!("Ignoring name outside Ended");
            return false;
        }

        let name = name.trim();
        if let Some(result) = self.result.take() {
            if name.is_empty() {
                info!("Result of {} declined", result.score);
            } else {
                let entry = RankingEntry {
                    player_name: name.to_string(),
                    score: result.score,
                    date: self.clock.now_iso(),
                    time_spent: result.time_spent,
                };
                self.ranking_entries = self.ranking.insert(entry);
                info!("Ranked {} with {}", name, result.score);
            }
        }
        self.phase = Phase::Idle;
        true
    }

    pub fn rename_entry(&mut self, index: usize, name: &str) -> bool {
        if !self.ranking.rename(index, name) {
            trace!("Ignoring rename of entry {}", index);
            return false;
        }
        self.ranking_entries = self.ranking.load();
        true
    }

    pub fn show_ranking(&mut self) -> bool {
        self.ranking_entries = self.ranking.load();
        self.ranking_open = true;
        true
    }

    pub fn close_ranking(&mut self) -> bool {
        let was_open = self.ranking_open;
        self.ranking_open = false;
        was_open
    }

    /// Deliver a due task from the scheduler. Ids that are no longer pending are
    /// ignored.
    pub fn fire(&mut self, id: TaskId) -> bool {
        if self.pending_tick == Some(id) {
            self.pending_tick = None;
            self.tick()
        } else if self.pending_reveal == Some(id) {
            self.pending_reveal = None;
            self.reveal_elapsed()
        } else {
            trace!("Ignoring stale task {:?}", id);
            false
        }
    }

    fn tick(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }

        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.time_remaining == 0 {
            self.finish();
        } else {
            self.pending_tick = Some(self.scheduler.schedule(self.config.tick_interval()));
        }
        true
    }

    fn reveal_elapsed(&mut self) -> bool {
        if self.phase != Phase::RoundResolved {
            return false;
        }
        self.next_round();
        self.phase = Phase::Active;
        true
    }

    fn finish(&mut self) {
        self.cancel_pending();
        self.round = None;
        self.phase = Phase::Ended;
        let result = SessionResult {
            score: self.session.score,
            total_rounds: self.session.total_rounds,
            time_spent: self.session.time_spent(),
        };
        self.result = Some(result);
        info!(
            "Time is up: {}/{} in {}s",
            result.score, result.total_rounds, result.time_spent
        );
    }

    fn next_round(&mut self) {
        let spec = generate_round(&self.catalog, self.random.as_mut());
        debug!(
            "New round: {} in {} position(s)",
            spec.target_note, spec.target_positions
        );
        self.round = Some(Round::new(spec));
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending_tick.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.pending_reveal.take() {
            self.scheduler.cancel(id);
        }
    }

    fn play(&mut self, frequency: f64) {
        if let Err(e) = self.audio.play_frequency(frequency, NOTE_DURATION) {
            warn!("Playback failed: {}", e);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = self.round.as_ref().map(|round| {
            let resolved = round.verdict().is_resolved();
            let selected = round
                .selection()
                .iter()
                .enumerate()
                .map(|(index, &position)| {
                    let note = self.catalog.note_at(position);
                    SelectedView {
                        position,
                        order: index + 1,
                        revealed_note: if resolved { note } else { None },
                        matches_target: resolved.then(|| note == Some(round.target_note())),
                    }
                })
                .collect();
            RoundView {
                target_note: round.target_note(),
                target_positions: round.target_positions(),
                selected,
                verdict: round.verdict(),
                can_confirm: self.phase == Phase::Active
                    && !round.selection().is_empty()
                    && round.selection().is_complete(),
            }
        });

        Snapshot {
            phase: self.phase,
            is_active: self.phase.is_active(),
            score: self.session.score,
            total_rounds: self.session.total_rounds,
            time_remaining: self.session.time_remaining,
            time_budget: self.session.time_budget,
            round,
            result: self.result,
            ranking_open: self.ranking_open,
            ranking: self.ranking_entries.clone(),
        }
    }
}
