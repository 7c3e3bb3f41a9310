//! Moon timer component for Bubble Tea applications.
//!
//! Combines the [`duration`](crate::duration) editor, the
//! [`countdown`](crate::countdown) engine and the [`moon`](crate::moon)
//! renderer into one widget: type a duration, press space to start or
//! pause, `r` to reset, and watch the moon fill in as time runs out.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_moontimer::moontimer::{new, with_radius};
//! use bubbletea_moontimer::duration::Field;
//! use bubbletea_moontimer::Component;
//!
//! let mut timer = new(&[with_radius(4)]);
//! timer.focus();
//! timer.set_field(Field::Minutes, "2");
//!
//! let first_tick = timer.start();
//! assert!(first_tick.is_some());
//! assert_eq!(timer.countdown().view(), "00:02:30");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_moontimer::moontimer::{new, Model};
//! use bubbletea_moontimer::Component;
//!
//! struct App {
//!     timer: Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut timer = new(&[]);
//!         timer.focus();
//!         (App { timer }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.timer.view()
//!     }
//! }
//! ```

pub mod keymap;
pub mod model;
pub mod view;


pub use keymap::{default_key_map, KeyMap};
pub use model::{
    new, with_dark_color, with_fill_characters, with_key_map, with_lit_color, with_radius,
    without_help, Model, MoonTimerOption,
};
