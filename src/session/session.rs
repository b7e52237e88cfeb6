use std::sync::Arc;

use anyhow::{Result, bail};
use log::{debug, info, warn};

use crate::clock::{AdjustableSource, GameplayClock};
use crate::config::SessionConfig;
use crate::judge;
use crate::model::{Schedule, ScheduledHit};
use crate::score::{ScoreAggregator, ScoreSnapshot};
use crate::session::actions::{ActionQueue, SessionAction};
use crate::session::skip::SkipController;
use crate::traits::input::InputEvent;
use crate::traits::presentation::SessionListener;
use crate::traits::time::TimeProvider;

/// Session lifecycle status. Failed and Completed are terminal: no
/// pause/resume/skip is permitted once either is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Playing,
    Paused,
    Failed,
    Completed,
    Exiting,
}

/// Transition result from a session update tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition {
    /// Stay in the current state.
    None,
    /// Completion hand-off fired; move to the results view.
    Next,
    /// Session is exiting; tear it down.
    Back,
    /// A restart was requested; call `restart()` to obtain the successor.
    Restart,
}

/// Everything the loading boundary supplies for one session.
#[derive(Debug, Clone)]
pub struct SessionSeed {
    pub hits: Vec<ScheduledHit>,
    pub config: SessionConfig,
}

impl SessionSeed {
    pub fn new(hits: Vec<ScheduledHit>) -> Self {
        Self {
            hits,
            config: SessionConfig::default(),
        }
    }

    pub fn with_config(hits: Vec<ScheduledHit>, config: SessionConfig) -> Self {
        Self { hits, config }
    }
}

/// The gameplay session: owns the clock and the hit-event schedule, drives
/// judgement once per tick, and orchestrates the status transitions.
///
/// All requests (pause/resume/exit/skip/restart) are deferred to the next
/// update tick and finalized only after that tick's judgement mutations
/// have settled. Within a tick, pending inputs are always applied before
/// time-based misses, so a well-timed input wins over a same-instant
/// timeout.
pub struct GameplaySession<S: ScoreAggregator> {
    seed: SessionSeed,
    config: SessionConfig,
    status: SessionStatus,
    clock: GameplayClock,
    source: Option<Arc<dyn AdjustableSource>>,
    wall: Arc<dyn TimeProvider>,
    schedule: Schedule,
    aggregator: S,
    listener: Arc<dyn SessionListener>,
    skip: SkipController,
    actions: ActionQueue,
    input_queue: Vec<InputEvent>,
    restart_count: u32,
    last_pause_action_us: Option<i64>,
    resume_valid: bool,
    pause_pending: bool,
    exit_intercepted: bool,
    overlay_dismissed: bool,
    restart_pending: bool,
    restart_signal: bool,
    completion_deadline_us: Option<i64>,
    completion_handed_off: bool,
}

impl<S: ScoreAggregator> GameplaySession<S> {
    pub fn new(
        seed: SessionSeed,
        aggregator: S,
        listener: Arc<dyn SessionListener>,
        source: Option<Arc<dyn AdjustableSource>>,
        wall: Arc<dyn TimeProvider>,
    ) -> Self {
        Self::with_restart_count(seed, aggregator, listener, source, wall, 0)
    }

    fn with_restart_count(
        seed: SessionSeed,
        aggregator: S,
        listener: Arc<dyn SessionListener>,
        source: Option<Arc<dyn AdjustableSource>>,
        wall: Arc<dyn TimeProvider>,
        restart_count: u32,
    ) -> Self {
        let config = seed.config.clone();
        let schedule = Schedule::new(seed.hits.clone());
        let clock = GameplayClock::new(source.clone(), wall.clone());
        let skip = SkipController::new(schedule.first_event_us(), &config);
        Self {
            seed,
            config,
            status: SessionStatus::Loading,
            clock,
            source,
            wall,
            schedule,
            aggregator,
            listener,
            skip,
            actions: ActionQueue::new(),
            input_queue: Vec::new(),
            restart_count,
            last_pause_action_us: None,
            resume_valid: true,
            pause_pending: false,
            exit_intercepted: false,
            overlay_dismissed: false,
            restart_pending: false,
            restart_signal: false,
            completion_deadline_us: None,
            completion_handed_off: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }

    pub fn current_time_us(&self) -> i64 {
        self.clock.current_time_us()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn aggregator(&self) -> &S {
        &self.aggregator
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        self.aggregator.snapshot()
    }

    pub fn is_resume_valid(&self) -> bool {
        self.resume_valid
    }

    pub fn skip_available(&self) -> bool {
        self.skip.is_available()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Validate the load and enter Playing. An empty schedule is a load
    /// failure: the session moves to Exiting and the error propagates as
    /// the termination signal.
    pub fn create(&mut self) -> Result<()> {
        if self.status != SessionStatus::Loading {
            debug!("create called twice; ignoring");
            return Ok(());
        }
        if self.schedule.is_empty() {
            self.status = SessionStatus::Exiting;
            warn!("session load failed: empty schedule");
            bail!("empty hit-event schedule");
        }
        if self.skip.is_available() {
            self.listener.on_skip_available();
        }
        self.clock.start();
        self.status = SessionStatus::Playing;
        info!(
            "session started: {} events, restart {}",
            self.schedule.len(),
            self.restart_count
        );
        Ok(())
    }

    /// Queue a player input for the next tick. Inputs arriving while not
    /// actively playing are dropped.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.status == SessionStatus::Playing && !self.pause_pending {
            self.input_queue.push(event);
        } else {
            debug!("input at {}us dropped (not playing)", event.time_us);
        }
    }

    pub fn request_pause(&mut self) {
        self.actions.push(SessionAction::Pause);
    }

    pub fn request_resume(&mut self) {
        self.actions.push(SessionAction::Resume);
    }

    pub fn request_exit(&mut self) {
        self.actions.push(SessionAction::Exit);
    }

    pub fn request_skip(&mut self) {
        self.actions.push(SessionAction::Skip);
    }

    pub fn request_restart(&mut self) {
        self.actions.push(SessionAction::Restart);
    }

    /// One cooperative update tick.
    pub fn update(&mut self) -> Result<StateTransition> {
        let now = self.clock.current_time_us();

        // Judgement: all pending inputs first, then time-based misses for
        // the same tick.
        if self.status == SessionStatus::Playing && !self.pause_pending {
            let inputs = std::mem::take(&mut self.input_queue);
            for input in inputs {
                if let Some(judgement) = judge::apply_input(&mut self.schedule, input.time_us) {
                    debug!(
                        "input at {}us judged event {} ({:?}, offset {}us)",
                        input.time_us, judgement.index, judgement.outcome, judgement.offset_us
                    );
                    self.aggregator
                        .record(judgement.kind, judgement.outcome, judgement.offset_us);
                }
            }
            for judgement in judge::expire_overdue(&mut self.schedule, now) {
                debug!("event {} missed at {}us", judgement.index, now);
                self.aggregator
                    .record(judgement.kind, judgement.outcome, judgement.offset_us);
            }
        }

        // Fail check: latched aggregator signal wins over a pending pause.
        if self.status == SessionStatus::Playing && self.aggregator.is_failed() {
            self.commit_fail();
        }

        // Second phase of a pause: the clock has confirmed stopped, so
        // re-validate before committing (a fail produced by in-flight
        // judgements takes precedence and lands above).
        if self.pause_pending && self.status == SessionStatus::Playing {
            self.pause_pending = false;
            if self.resume_valid && !self.clock.is_running() {
                self.status = SessionStatus::Paused;
                self.last_pause_action_us = Some(now);
                self.overlay_dismissed = false;
                info!("session paused at {}us", now);
                self.listener.on_paused(self.restart_count);
            } else {
                debug!("pause abandoned");
                self.clock.start();
            }
        }

        // Deferred requests, FIFO.
        for action in self.actions.drain() {
            self.apply_action(action, now);
        }

        // Skip affordance expiry.
        if self.skip.update(now) {
            debug!("skip affordance expired at {}us", now);
        }

        // Completion: all events judged with no fail. Resume validity is
        // revoked immediately; the hand-off waits out the settle delay and
        // fires exactly once.
        if self.status == SessionStatus::Playing
            && !self.pause_pending
            && self.schedule.all_judged()
            && !self.aggregator.is_failed()
            && self.completion_deadline_us.is_none()
        {
            self.status = SessionStatus::Completed;
            self.resume_valid = false;
            self.completion_deadline_us = Some(now + self.config.completion_settle_us);
            info!("session completed at {}us", now);
        }
        if self.status == SessionStatus::Completed
            && !self.completion_handed_off
            && let Some(deadline) = self.completion_deadline_us
            && now >= deadline
        {
            self.completion_handed_off = true;
            let snapshot = self.aggregator.snapshot();
            info!("results hand-off: {:?}", snapshot);
            self.listener.on_completed(&snapshot);
            return Ok(StateTransition::Next);
        }

        if self.restart_signal {
            self.restart_signal = false;
            return Ok(StateTransition::Restart);
        }

        match self.status {
            SessionStatus::Exiting => Ok(StateTransition::Back),
            _ => Ok(StateTransition::None),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn can_pause(&self, now_us: i64) -> bool {
        self.status == SessionStatus::Playing
            && self.resume_valid
            && self
                .last_pause_action_us
                .is_none_or(|t| now_us - t >= self.config.pause_cooldown_us)
    }

    /// First phase of a pause: stop the clock; the commit happens next
    /// tick once the stop is confirmed.
    fn begin_pause(&mut self) {
        self.clock.stop();
        self.pause_pending = true;
    }

    fn commit_fail(&mut self) {
        self.status = SessionStatus::Failed;
        self.pause_pending = false;
        self.clock.stop();
        info!("session failed (restart {})", self.restart_count);
        self.listener.on_failed(self.restart_count);
    }

    fn commit_exit(&mut self) {
        self.status = SessionStatus::Exiting;
        self.pause_pending = false;
        self.clock.stop();
        info!("session exiting");
    }

    fn apply_action(&mut self, action: SessionAction, now_us: i64) {
        match action {
            SessionAction::Pause => {
                if self.status == SessionStatus::Playing
                    && !self.pause_pending
                    && self.can_pause(now_us)
                {
                    self.begin_pause();
                } else {
                    debug!("pause refused at {}us", now_us);
                }
            }
            SessionAction::Resume => {
                if self.status == SessionStatus::Paused {
                    self.status = SessionStatus::Playing;
                    self.last_pause_action_us = Some(now_us);
                    self.overlay_dismissed = true;
                    self.exit_intercepted = false;
                    self.clock.start();
                    info!("session resumed at {}us", now_us);
                    self.listener.on_resumed();
                } else {
                    debug!("resume refused (not paused)");
                }
            }
            SessionAction::Exit => self.apply_exit(now_us),
            SessionAction::Skip => {
                if self.status == SessionStatus::Playing
                    && !self.pause_pending
                    && let Some(target) = self.skip.consume()
                {
                    self.clock.seek(target);
                    info!("lead-in skipped to {}us", target);
                    self.listener.on_skip_consumed();
                } else {
                    debug!("skip refused");
                }
            }
            SessionAction::Restart => {
                if self.restart_pending || self.completion_deadline_us.is_some() {
                    // One-shot, and a scheduled hand-off is not cancellable:
                    // a restart inside the settle window is absorbed.
                    debug!("restart request absorbed");
                } else {
                    self.restart_pending = true;
                    self.restart_signal = true;
                }
            }
        }
    }

    /// Exit with the pause override: a first exit while actively playing
    /// is converted into a pause, unless the pause overlay was actively
    /// dismissed while the cooldown still blocks a new pause; then the
    /// exit goes through rather than forcing an unusable pause.
    fn apply_exit(&mut self, now_us: i64) {
        match self.status {
            SessionStatus::Playing if self.resume_valid => {
                if self.exit_intercepted {
                    self.commit_exit();
                } else if self.pause_pending {
                    // A pause is already in flight; let it land and require
                    // a second exit.
                    self.exit_intercepted = true;
                } else if self.can_pause(now_us) {
                    self.exit_intercepted = true;
                    self.begin_pause();
                    debug!("exit converted to pause");
                } else if self.overlay_dismissed {
                    self.commit_exit();
                } else {
                    self.exit_intercepted = true;
                    debug!("exit suppressed (pause unavailable)");
                }
            }
            _ => self.commit_exit(),
        }
    }
}

impl<S: ScoreAggregator + Default> GameplaySession<S> {
    /// Construct the successor session for a restart. The current session
    /// is only invalidated once the new one is fully initialized; on error
    /// it is left untouched.
    pub fn restart(&mut self) -> Result<Self> {
        let mut next = Self::with_restart_count(
            self.seed.clone(),
            S::default(),
            Arc::clone(&self.listener),
            self.source.clone(),
            Arc::clone(&self.wall),
            self.restart_count + 1,
        );
        next.create()?;
        self.resume_valid = false;
        self.commit_exit();
        info!("session restarted (restart {})", next.restart_count);
        Ok(next)
    }
}
