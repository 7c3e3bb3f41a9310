//! Core model implementation for the moon timer component.

use super::keymap::{default_key_map, KeyMap};
use crate::countdown::Model as Countdown;
use crate::duration::{Field, Model as Editor};
use crate::key::matches_binding;
use crate::moon::{self, MoonOption};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::lipgloss::{Color, Style};
use std::time::Duration;
use tracing::debug;

/// Options for configuring a moon timer at construction.
#[derive(Debug, Clone)]
pub enum MoonTimerOption {
    /// Moon radius in terminal rows.
    WithRadius(usize),
    /// Color of the lit part of the moon.
    WithLitColor(String),
    /// Color of the shadowed part of the moon.
    WithDarkColor(String),
    /// Characters for the lit and shadowed parts of the moon.
    WithFillCharacters(char, char),
    /// Hide the help line.
    WithoutHelp,
    /// Replace the key bindings.
    WithKeyMap(KeyMap),
}

impl MoonTimerOption {
    fn apply(&self, m: &mut Model) {
        match self {
            MoonTimerOption::WithRadius(radius) => {
                MoonOption::WithRadius(*radius).apply(&mut m.moon);
            }
            MoonTimerOption::WithLitColor(color) => {
                MoonOption::WithLitColor(color.clone()).apply(&mut m.moon);
            }
            MoonTimerOption::WithDarkColor(color) => {
                MoonOption::WithDarkColor(color.clone()).apply(&mut m.moon);
            }
            MoonTimerOption::WithFillCharacters(lit, dark) => {
                MoonOption::WithFillCharacters(*lit, *dark).apply(&mut m.moon);
            }
            MoonTimerOption::WithoutHelp => m.show_help = false,
            MoonTimerOption::WithKeyMap(keymap) => m.keymap = keymap.clone(),
        }
    }
}

/// Moon radius in terminal rows.
pub fn with_radius(radius: usize) -> MoonTimerOption {
    MoonTimerOption::WithRadius(radius)
}

/// Color of the lit part of the moon, e.g. `"#FFFFFF"`.
pub fn with_lit_color(color: impl Into<String>) -> MoonTimerOption {
    MoonTimerOption::WithLitColor(color.into())
}

/// Color of the shadowed part of the moon.
pub fn with_dark_color(color: impl Into<String>) -> MoonTimerOption {
    MoonTimerOption::WithDarkColor(color.into())
}

/// Characters for the lit and shadowed parts of the moon.
pub fn with_fill_characters(lit: char, dark: char) -> MoonTimerOption {
    MoonTimerOption::WithFillCharacters(lit, dark)
}

/// Hides the help line under the fields.
pub fn without_help() -> MoonTimerOption {
    MoonTimerOption::WithoutHelp
}

/// Replaces the default key bindings.
pub fn with_key_map(keymap: KeyMap) -> MoonTimerOption {
    MoonTimerOption::WithKeyMap(keymap)
}

/// The moon timer widget.
///
/// The duration editor and the countdown engine are not public outside the
/// `moontimer` module, so callers change them only through the operations
/// below; read access is available through [`Model::editor`] and
/// [`Model::countdown`].
#[derive(Debug, Clone)]
pub struct Model {
    pub(super) editor: Editor,
    pub(super) countdown: Countdown,

    /// Moon renderer.
    pub moon: moon::Model,
    /// Key bindings.
    pub keymap: KeyMap,
    /// Whether the help line is rendered.
    pub show_help: bool,

    /// Style of the `HH:MM:SS` readout.
    pub time_style: Style,
    /// Style of an inactive duration field.
    pub field_style: Style,
    /// Style of the field receiving input while focused.
    pub active_field_style: Style,
    /// Style of key names in the help line.
    pub help_key_style: Style,
    /// Style of descriptions in the help line.
    pub help_desc_style: Style,
}

/// Creates a moon timer seeded with the default 00:00:30 duration.
pub fn new(opts: &[MoonTimerOption]) -> Model {
    let mut m = Model {
        editor: Editor::new(),
        countdown: Countdown::new(),
        moon: moon::new(&[]),
        keymap: default_key_map(),
        show_help: true,
        time_style: Style::new().foreground(Color::from("#9CA3AF")),
        field_style: Style::new().foreground(Color::from("#FFFFFF")),
        active_field_style: Style::new()
            .foreground(Color::from("#FFFFFF"))
            .underline(true),
        help_key_style: Style::new().foreground(Color::from("#909090")),
        help_desc_style: Style::new().foreground(Color::from("#626262")),
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl Model {
    /// The duration editor.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The countdown engine.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Normalizes `raw` into a duration field. Has no effect on a countdown
    /// in progress until the next fresh start.
    pub fn set_field(&mut self, field: Field, raw: &str) {
        self.editor.set_field(field, raw);
    }

    /// The duration the fields currently describe.
    pub fn requested_duration(&self) -> Duration {
        self.editor.requested_duration()
    }

    /// Fraction of the countdown remaining, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.countdown.progress()
    }

    /// Whether the countdown is running.
    pub fn running(&self) -> bool {
        self.countdown.running()
    }

    /// Starts a fresh countdown from the fields, or resumes a paused one.
    /// Returns the first tick when a tick chain was armed.
    pub fn start(&mut self) -> Option<Cmd> {
        self.countdown.start(&self.editor)
    }

    /// Pauses the countdown.
    pub fn stop(&mut self) {
        self.countdown.stop();
    }

    /// Starts when stopped, pauses when running.
    pub fn toggle(&mut self) -> Option<Cmd> {
        self.countdown.toggle(&self.editor)
    }

    /// Stops the countdown, clears the remaining time and restores the
    /// default 00:00:30 duration.
    pub fn reset(&mut self) {
        self.countdown.reset();
        self.editor.reset();
    }

    /// Cancels any pending tick. Call when the widget is removed from the
    /// screen.
    pub fn teardown(&mut self) {
        self.countdown.teardown();
    }

    /// Handles key presses (while focused) and countdown ticks.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focused() {
                return None;
            }
            if matches_binding(key_msg, &self.keymap.toggle) {
                return self.toggle();
            }
            if matches_binding(key_msg, &self.keymap.reset) {
                self.reset();
                return None;
            }
            if self.editor.handle_key(key_msg, &self.keymap.fields) {
                debug!(
                    field = %self.editor.active(),
                    value = self.editor.value(self.editor.active()),
                    "duration field edited"
                );
            }
            return None;
        }

        self.countdown.update(msg)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.editor.focus()
    }

    fn blur(&mut self) {
        self.editor.blur();
    }

    fn focused(&self) -> bool {
        self.editor.focused()
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(&[]);
        let cmd = model.focus();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
