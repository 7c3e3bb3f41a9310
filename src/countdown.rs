//! Countdown engine for the moon timer.
//!
//! The engine is a three-state machine (Idle, Running, Paused) driven by a
//! one-second tick while running. The tick is a bubbletea-rs command that
//! delivers a [`TickMsg`] back into [`Model::update`]; the engine re-arms it
//! after every accepted tick, which forms a single tick chain.
//!
//! Every arm and disarm bumps an internal tag. Ticks carrying a stale tag
//! (scheduled before a stop, reset, expiry or teardown) are dropped, so at
//! most one chain can ever mutate the engine and no tick lands after the
//! engine has left Running.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_moontimer::countdown::{Model, State};
//! use bubbletea_moontimer::duration::{Field, Model as Editor};
//!
//! let mut editor = Editor::new();
//! editor.set_field(Field::Seconds, "5");
//!
//! let mut engine = Model::new();
//! assert_eq!(engine.state(), State::Idle);
//!
//! let tick = engine.start(&editor);
//! assert!(tick.is_some());
//! assert_eq!(engine.state(), State::Running);
//! assert_eq!(engine.view(), "00:00:05");
//!
//! engine.stop();
//! assert_eq!(engine.state(), State::Paused);
//! assert_eq!(engine.remaining_seconds(), 5);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_moontimer::countdown::{Model, TimeoutMsg};
//! use bubbletea_moontimer::duration::Model as Editor;
//!
//! struct App {
//!     editor: Editor,
//!     engine: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let editor = Editor::new();
//!         let mut engine = Model::new();
//!         let cmd = engine.start(&editor);
//!         (App { editor, engine, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
//!             if timeout.id == self.engine.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.engine.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.engine.view()
//!     }
//! }
//! ```

use crate::duration::Model as Editor;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// Time between two ticks of a running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Formats a number of seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so the output stays correct for any input.
///
/// ```rust
/// use bubbletea_moontimer::countdown::format_hms;
///
/// assert_eq!(format_hms(0), "00:00:00");
/// assert_eq!(format_hms(3599), "00:59:59");
/// assert_eq!(format_hms(86_399), "23:59:59");
/// ```
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Message delivered once per second while a countdown runs.
///
/// Produced by the command returned from [`Model::start`] and by
/// [`Model::update`] after each accepted tick. Application code only needs
/// to forward it to the engine.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The engine that scheduled this tick.
    pub id: i64,
    /// Tick chain this message belongs to. Messages from a chain that has
    /// since been disarmed are ignored.
    tag: i64,
}

/// Message sent once when a countdown reaches zero on its own.
///
/// Not sent for stop or reset.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    /// The engine whose countdown finished.
    pub id: i64,
}

/// The three states of the countdown engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing to count: remaining time is zero and the engine is stopped.
    Idle,
    /// Counting down; a tick chain is armed.
    Running,
    /// Stopped with time left; `start` resumes from where it stopped.
    Paused,
}

/// Countdown engine state.
///
/// Only `start`, `stop`, `reset`, `teardown` and accepted ticks change it.
/// The progress fraction and display string are derived on every read.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,
    total_seconds: u64,
    remaining_seconds: u64,
    running: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an idle engine with nothing counted.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            total_seconds: 0,
            remaining_seconds: 0,
            running: false,
        }
    }

    /// Unique identifier of this engine, carried by its tick and timeout
    /// messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether a countdown is in progress.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Length of the current (or last) countdown in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Seconds left on the countdown.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// The current state, derived from the running flag and remaining time.
    pub fn state(&self) -> State {
        if self.running {
            State::Running
        } else if self.remaining_seconds > 0 {
            State::Paused
        } else {
            State::Idle
        }
    }

    /// Fraction of the countdown still remaining, in `[0, 1]`. Zero when no
    /// countdown has been started.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        self.remaining_seconds as f64 / self.total_seconds as f64
    }

    /// Starts or resumes the countdown.
    ///
    /// From Idle the editor's requested duration is read once; a zero
    /// duration leaves the engine untouched. From Paused the countdown
    /// resumes with its total and remaining time unchanged. While already
    /// Running this does nothing, so the live tick chain is left alone.
    ///
    /// Returns the command that delivers the first tick when a chain was
    /// armed.
    pub fn start(&mut self, editor: &Editor) -> Option<Cmd> {
        match self.state() {
            State::Running => None,
            State::Paused => {
                self.running = true;
                debug!(
                    id = self.id,
                    remaining = self.remaining_seconds,
                    "countdown resumed"
                );
                Some(self.arm())
            }
            State::Idle => {
                let total = editor.requested_duration().as_secs();
                if total == 0 {
                    debug!(id = self.id, "ignoring start with zero duration");
                    return None;
                }
                self.total_seconds = total;
                self.remaining_seconds = total;
                self.running = true;
                debug!(id = self.id, total, "countdown started");
                Some(self.arm())
            }
        }
    }

    /// Pauses a running countdown. Remaining time is kept as is.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.disarm();
        debug!(
            id = self.id,
            remaining = self.remaining_seconds,
            "countdown stopped"
        );
    }

    /// Starts when stopped, stops when running.
    pub fn toggle(&mut self, editor: &Editor) -> Option<Cmd> {
        if self.running {
            self.stop();
            None
        } else {
            self.start(editor)
        }
    }

    /// Returns to Idle from any state. The total is kept but has no effect
    /// while nothing remains.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = 0;
        self.disarm();
        debug!(id = self.id, "countdown reset");
    }

    /// Cancels any pending tick unconditionally. Call before the engine is
    /// dropped by its owner so an in-flight tick can never be applied.
    pub fn teardown(&mut self) {
        self.running = false;
        self.disarm();
        debug!(id = self.id, "countdown torn down");
    }

    /// Processes tick messages. Ticks for other engines, from disarmed
    /// chains, or arriving while stopped are ignored.
    ///
    /// Returns the next tick while time remains, or a command delivering
    /// [`TimeoutMsg`] when this tick finished the countdown.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if tick.id != self.id {
            return None;
        }
        if !self.running || tick.tag != self.tag {
            trace!(id = self.id, tag = tick.tag, current = self.tag, "dropping stale tick");
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return Some(self.schedule());
        }

        self.running = false;
        self.disarm();
        debug!(id = self.id, total = self.total_seconds, "countdown finished");
        Some(self.timeout_cmd())
    }

    /// Remaining time as `HH:MM:SS`.
    pub fn view(&self) -> String {
        format_hms(self.remaining_seconds)
    }

    /// The tick the currently armed chain would deliver next.
    #[cfg(test)]
    pub(crate) fn armed_tick(&self) -> Msg {
        Box::new(TickMsg {
            id: self.id,
            tag: self.tag,
        })
    }

    fn arm(&mut self) -> Cmd {
        self.tag += 1;
        self.schedule()
    }

    fn disarm(&mut self) {
        self.tag += 1;
    }

    fn schedule(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn timeout_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeoutMsg { id }) as Msg
        })
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::Field;

    fn editor(h: &str, m: &str, s: &str) -> Editor {
        let mut e = Editor::new();
        e.set_field(Field::Hours, h);
        e.set_field(Field::Minutes, m);
        e.set_field(Field::Seconds, s);
        e
    }

    fn tick_for(engine: &Model) -> Msg {
        engine.armed_tick()
    }

    #[test]
    fn test_new_is_idle() {
        let engine = Model::new();
        assert_eq!(engine.state(), State::Idle);
        assert_eq!(engine.total_seconds(), 0);
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(!engine.running());
        assert_eq!(engine.view(), "00:00:00");
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_unique_ids() {
        let a = Model::new();
        let b = Model::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id() > 0);
    }

    #[test]
    fn test_zero_duration_start_is_noop() {
        let mut engine = Model::new();
        let tag = engine.tag;
        let cmd = engine.start(&editor("00", "00", "00"));
        assert!(cmd.is_none());
        assert_eq!(engine.state(), State::Idle);
        assert_eq!(engine.total_seconds(), 0);
        assert_eq!(engine.tag, tag);
    }

    #[test]
    fn test_five_second_countdown() {
        let mut engine = Model::new();
        assert!(engine.start(&editor("00", "00", "05")).is_some());
        assert_eq!(engine.total_seconds(), 5);
        assert_eq!(engine.remaining_seconds(), 5);

        for expected in [4, 3, 2, 1] {
            let next = engine.update(tick_for(&engine));
            assert!(next.is_some());
            assert_eq!(engine.remaining_seconds(), expected);
            assert!(engine.running());
        }

        let stale = tick_for(&engine);
        let last = engine.update(tick_for(&engine));
        assert!(last.is_some(), "expiry emits a timeout command");
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(!engine.running());
        assert_eq!(engine.state(), State::Idle);

        // The chain is cancelled: a sixth tick from it does nothing.
        assert!(engine.update(stale).is_none());
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.total_seconds(), 5);
    }

    #[test]
    fn test_stop_preserves_remaining_and_resume() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        engine.update(tick_for(&engine));
        engine.update(tick_for(&engine));
        assert_eq!(engine.remaining_seconds(), 8);

        engine.stop();
        assert_eq!(engine.state(), State::Paused);
        assert_eq!(engine.remaining_seconds(), 8);

        // Resuming ignores the editor, even if it now asks for something else.
        assert!(engine.start(&editor("05", "00", "00")).is_some());
        assert_eq!(engine.state(), State::Running);
        assert_eq!(engine.total_seconds(), 10);
        assert_eq!(engine.remaining_seconds(), 8);
    }

    #[test]
    fn test_tick_after_stop_is_dropped() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        let pending = tick_for(&engine);
        engine.stop();

        assert!(engine.update(pending).is_none());
        assert_eq!(engine.remaining_seconds(), 10);
    }

    #[test]
    fn test_restart_drops_old_chain() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        let old = tick_for(&engine);
        engine.stop();
        engine.start(&editor("00", "00", "10"));

        assert!(engine.update(old).is_none());
        assert_eq!(engine.remaining_seconds(), 10);
        assert!(engine.update(tick_for(&engine)).is_some());
        assert_eq!(engine.remaining_seconds(), 9);
    }

    #[test]
    fn test_start_while_running_keeps_chain() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        let tag = engine.tag;
        let live = tick_for(&engine);

        assert!(engine.start(&editor("00", "00", "10")).is_none());
        assert_eq!(engine.tag, tag);
        assert!(engine.update(live).is_some());
        assert_eq!(engine.remaining_seconds(), 9);
    }

    #[test]
    fn test_stop_when_not_running_is_noop() {
        let mut engine = Model::new();
        engine.stop();
        assert_eq!(engine.state(), State::Idle);

        engine.start(&editor("00", "00", "03"));
        engine.stop();
        let tag = engine.tag;
        engine.stop();
        assert_eq!(engine.state(), State::Paused);
        assert_eq!(engine.tag, tag);
    }

    #[test]
    fn test_reset_from_every_state() {
        // Idle
        let mut engine = Model::new();
        engine.reset();
        assert_eq!(engine.state(), State::Idle);

        // Running
        engine.start(&editor("00", "01", "00"));
        let pending = tick_for(&engine);
        engine.reset();
        assert_eq!(engine.state(), State::Idle);
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(!engine.running());
        assert!(engine.update(pending).is_none());
        assert_eq!(engine.progress(), 0.0);

        // Paused
        engine.start(&editor("00", "01", "00"));
        engine.stop();
        engine.reset();
        assert_eq!(engine.state(), State::Idle);
        assert_eq!(engine.remaining_seconds(), 0);
    }

    #[test]
    fn test_start_after_reset_reads_editor_again() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        engine.reset();
        engine.start(&editor("00", "00", "20"));
        assert_eq!(engine.total_seconds(), 20);
        assert_eq!(engine.remaining_seconds(), 20);
    }

    #[test]
    fn test_teardown_cancels_pending_tick() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        let pending = tick_for(&engine);
        engine.teardown();

        assert!(!engine.running());
        assert!(engine.update(pending).is_none());
        assert_eq!(engine.remaining_seconds(), 10);
    }

    #[test]
    fn test_ticks_for_other_engines_ignored() {
        let mut a = Model::new();
        let mut b = Model::new();
        a.start(&editor("00", "00", "10"));
        b.start(&editor("00", "00", "10"));

        assert!(a.update(tick_for(&b)).is_none());
        assert_eq!(a.remaining_seconds(), 10);
    }

    #[test]
    fn test_unrelated_messages_ignored() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "10"));
        assert!(engine.update(Box::new(TimeoutMsg { id: engine.id() })).is_none());
        assert_eq!(engine.remaining_seconds(), 10);
    }

    #[test]
    fn test_toggle() {
        let mut engine = Model::new();
        let e = editor("00", "00", "10");
        assert!(engine.toggle(&e).is_some());
        assert_eq!(engine.state(), State::Running);
        assert!(engine.toggle(&e).is_none());
        assert_eq!(engine.state(), State::Paused);
        assert!(engine.toggle(&e).is_some());
        assert_eq!(engine.state(), State::Running);
    }

    #[test]
    fn test_progress() {
        let mut engine = Model::new();
        engine.total_seconds = 100;
        engine.remaining_seconds = 25;
        assert_eq!(engine.progress(), 0.25);

        engine.total_seconds = 0;
        engine.remaining_seconds = 0;
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_progress_tracks_ticks() {
        let mut engine = Model::new();
        engine.start(&editor("00", "00", "04"));
        assert_eq!(engine.progress(), 1.0);
        engine.update(tick_for(&engine));
        assert_eq!(engine.progress(), 0.75);
        engine.update(tick_for(&engine));
        assert_eq!(engine.progress(), 0.5);
    }

    #[test]
    fn test_one_hour_display() {
        let mut engine = Model::new();
        engine.start(&editor("1", "00", "00"));
        assert_eq!(engine.total_seconds(), 3600);
        assert_eq!(engine.remaining_seconds(), 3600);
        assert_eq!(engine.view(), "01:00:00");

        engine.update(tick_for(&engine));
        assert_eq!(engine.view(), "00:59:59");
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(23 * 3600 + 59 * 60 + 59), "23:59:59");
    }
}
