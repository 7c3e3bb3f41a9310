#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-moontimer/")]

//! # bubbletea-moontimer
//!
//! A crescent-moon countdown timer for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The user enters hours, minutes and seconds, starts or pauses the
//! countdown, and watches a moon fill in as the time runs down. The
//! widget follows the Elm Architecture like every bubbletea-rs component:
//! messages go into `update()`, which may return a command, and `view()`
//! renders the current state.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`duration`] | Hours/minutes/seconds editor with clamped fields |
//! | [`countdown`] | Idle/Running/Paused countdown engine driven by a one-second tick |
//! | [`moon`] | Crescent rendering for terminals and SVG |
//! | [`moontimer`] | The complete widget combining the three |
//! | [`key`] | Key bindings and help text |
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_moontimer::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     timer: MoonTimer,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut timer = moontimer_new(&[]);
//!         let cmd = timer.focus();
//!         (Self { timer }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<CountdownTimeoutMsg>() {
//!             if done.id == self.timer.countdown().id() {
//!                 // The moon has set.
//!             }
//!         }
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.timer.view()
//!     }
//! }
//! ```
//!
//! ## Tick Handling
//!
//! While running, the countdown schedules one tick per second as a
//! bubbletea-rs command. Stopping, resetting, finishing or tearing down the
//! timer cancels the pending tick before returning, so a late tick can never
//! change a timer that has left the running state. Call
//! [`moontimer::Model::teardown`] when removing the widget from the screen.

pub mod countdown;
pub mod duration;
pub mod key;
pub mod moon;
pub mod moontimer;

use bubbletea_rs::Cmd;

/// Focus management for components that take keyboard input.
///
/// A focused component reacts to key messages; a blurred one ignores them
/// and renders without its input highlight.
///
/// ```rust
/// use bubbletea_moontimer::prelude::*;
///
/// let mut timer = moontimer_new(&[]);
/// assert!(!timer.focused());
///
/// timer.focus();
/// assert!(timer.focused());
///
/// timer.blur();
/// assert!(!timer.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state. May return a command to run on
    /// focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use countdown::{
    format_hms, Model as Countdown, State as CountdownState, TickMsg as CountdownTickMsg,
    TimeoutMsg as CountdownTimeoutMsg,
};
pub use duration::{DurationField, Field, KeyMap as DurationKeyMap, Model as DurationEditor};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use moon::{crescent_path, Cell as MoonCell, Model as Moon};
pub use moontimer::{
    default_key_map as moontimer_default_key_map, new as moontimer_new,
    KeyMap as MoonTimerKeyMap, Model as MoonTimer, MoonTimerOption,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_moontimer::prelude::*;
///
/// let timer: MoonTimer = moontimer_new(&[]);
/// assert_eq!(timer.countdown().state(), CountdownState::Idle);
/// ```
pub mod prelude {
    pub use crate::countdown::{
        Model as Countdown, State as CountdownState, TickMsg as CountdownTickMsg,
        TimeoutMsg as CountdownTimeoutMsg,
    };
    pub use crate::duration::{Field, Model as DurationEditor};
    pub use crate::key::{
        matches, matches_binding, new_binding, with_help, with_keys_str, Binding, KeyMap,
    };
    pub use crate::moon::Model as Moon;
    pub use crate::moontimer::{
        new as moontimer_new, with_dark_color, with_fill_characters, with_key_map,
        with_lit_color, with_radius, without_help, KeyMap as MoonTimerKeyMap,
        Model as MoonTimer, MoonTimerOption,
    };
    pub use crate::Component;
}
