//! Duration editor: the hours/minutes/seconds fields of the moon timer.
//!
//! Each field holds an integer within an inclusive range and is normalized on
//! every edit. Free-form text is parsed leniently and clamped into range, so
//! editing never fails:
//!
//! ```rust
//! use bubbletea_moontimer::duration::{Field, Model};
//! use std::time::Duration;
//!
//! let mut editor = Model::new();
//! assert_eq!(editor.requested_duration(), Duration::from_secs(30));
//!
//! editor.set_field(Field::Hours, "99");
//! editor.set_field(Field::Minutes, "abc");
//! editor.set_field(Field::Seconds, "7");
//! assert_eq!(editor.field_view(Field::Hours), "23");
//! assert_eq!(editor.field_view(Field::Minutes), "00");
//! assert_eq!(editor.field_view(Field::Seconds), "07");
//! ```

use crate::key::{
    matches_binding, new_binding, with_help, with_keys_str, Binding, KeyMap as KeyMapTrait,
};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;
use std::time::Duration;

/// Hours shown after a reset.
pub const DEFAULT_HOURS: u8 = 0;
/// Minutes shown after a reset.
pub const DEFAULT_MINUTES: u8 = 0;
/// Seconds shown after a reset. Together with the constants above this is
/// the 00:00:30 duration offered on mount and after every reset.
pub const DEFAULT_SECONDS: u8 = 30;

/// Key bindings for moving between fields and deleting digits.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move input to the next field.
    pub next_field: Binding,
    /// Move input to the previous field.
    pub prev_field: Binding,
    /// Drop the last digit of the active field.
    pub delete_digit: Binding,
}

/// The default bindings: tab and the right arrow move forward, shift+tab and
/// the left arrow move back, backspace deletes a digit.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next_field: new_binding(vec![
            with_keys_str(&["tab", "right"]),
            with_help("tab/→", "next field"),
        ]),
        prev_field: new_binding(vec![
            with_keys_str(&["shift+tab", "left"]),
            with_help("shift+tab/←", "prev field"),
        ]),
        delete_digit: new_binding(vec![
            with_keys_str(&["backspace"]),
            with_help("backspace", "delete digit"),
        ]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl KeyMapTrait for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next_field, &self.prev_field]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.next_field, &self.prev_field, &self.delete_digit]]
    }
}

/// One of the three duration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Hours, 0 through 23.
    Hours,
    /// Minutes, 0 through 59.
    Minutes,
    /// Seconds, 0 through 59.
    Seconds,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Largest value the field accepts.
    pub fn max(self) -> u8 {
        match self {
            Field::Hours => 23,
            Field::Minutes | Field::Seconds => 59,
        }
    }

    /// Seconds represented by one unit of this field.
    pub fn unit_seconds(self) -> u64 {
        match self {
            Field::Hours => 3600,
            Field::Minutes => 60,
            Field::Seconds => 1,
        }
    }

    /// The field to the right, wrapping around.
    pub fn next(self) -> Field {
        match self {
            Field::Hours => Field::Minutes,
            Field::Minutes => Field::Seconds,
            Field::Seconds => Field::Hours,
        }
    }

    /// The field to the left, wrapping around.
    pub fn prev(self) -> Field {
        match self {
            Field::Hours => Field::Seconds,
            Field::Minutes => Field::Hours,
            Field::Seconds => Field::Minutes,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// Parses `raw` leniently and clamps it to `[0, max]`.
///
/// Leading whitespace is skipped, an optional sign is accepted and the
/// leading run of digits is used; anything after it is ignored. Text with
/// no leading digits yields 0, negative numbers yield 0 and numbers too
/// large to represent yield `max`.
///
/// ```rust
/// use bubbletea_moontimer::duration::normalize;
///
/// assert_eq!(normalize("42", 59), 42);
/// assert_eq!(normalize("75", 59), 59);
/// assert_eq!(normalize("-3", 59), 0);
/// assert_eq!(normalize("12abc", 59), 12);
/// assert_eq!(normalize("abc", 59), 0);
/// ```
pub fn normalize(raw: &str, max: u8) -> u8 {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if digits.is_empty() || negative {
        return 0;
    }

    match digits.parse::<u64>() {
        Ok(n) => n.min(u64::from(max)) as u8,
        // Only overflow can fail here: the slice is all ASCII digits.
        Err(_) => max,
    }
}

/// A bounded numeric duration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationField {
    field: Field,
    value: u8,
}

impl DurationField {
    /// Creates a field holding `value`, clamped to the field's range.
    pub fn new(field: Field, value: u8) -> Self {
        Self {
            field,
            value: value.min(field.max()),
        }
    }

    /// Which field this is.
    pub fn field(&self) -> Field {
        self.field
    }

    /// The current value, always within `[0, field.max()]`.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Normalizes `raw` into the field.
    pub fn set(&mut self, raw: &str) {
        self.value = normalize(raw, self.field.max());
    }
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.value)
    }
}

/// The duration editor: three fields plus the keyboard focus state used when
/// the editor is driven by key messages.
#[derive(Debug, Clone)]
pub struct Model {
    hours: DurationField,
    minutes: DurationField,
    seconds: DurationField,
    active: Field,
    focus: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            hours: DurationField::new(Field::Hours, DEFAULT_HOURS),
            minutes: DurationField::new(Field::Minutes, DEFAULT_MINUTES),
            seconds: DurationField::new(Field::Seconds, DEFAULT_SECONDS),
            active: Field::Hours,
            focus: false,
        }
    }
}

impl Model {
    /// Creates an editor seeded with the default 00:00:30 duration.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: Field) -> &DurationField {
        match field {
            Field::Hours => &self.hours,
            Field::Minutes => &self.minutes,
            Field::Seconds => &self.seconds,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut DurationField {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    /// Normalizes `raw` into `field`. Out-of-range or non-numeric text is
    /// clamped, never rejected.
    pub fn set_field(&mut self, field: Field, raw: &str) {
        self.slot_mut(field).set(raw);
    }

    /// The numeric value of `field`.
    pub fn value(&self, field: Field) -> u8 {
        self.slot(field).value()
    }

    /// The two-digit display string of `field`.
    pub fn field_view(&self, field: Field) -> String {
        self.slot(field).to_string()
    }

    /// Restores the default 00:00:30 duration.
    pub fn reset(&mut self) {
        self.hours = DurationField::new(Field::Hours, DEFAULT_HOURS);
        self.minutes = DurationField::new(Field::Minutes, DEFAULT_MINUTES);
        self.seconds = DurationField::new(Field::Seconds, DEFAULT_SECONDS);
    }

    /// The duration the three fields currently describe.
    ///
    /// This is the only way the countdown engine reads the editor, and it
    /// does so once per fresh start.
    pub fn requested_duration(&self) -> Duration {
        let secs = Field::ALL
            .iter()
            .map(|&f| u64::from(self.value(f)) * f.unit_seconds())
            .sum();
        Duration::from_secs(secs)
    }

    /// The field receiving keyboard input.
    pub fn active(&self) -> Field {
        self.active
    }

    /// Moves keyboard input to `field`.
    pub fn set_active(&mut self, field: Field) {
        self.active = field;
    }

    /// Handles a key press while focused: digits are appended to the active
    /// field, backspace drops its last digit, and the field bindings move
    /// between fields. Returns whether the key was consumed.
    pub fn handle_key(&mut self, msg: &KeyMsg, keymap: &KeyMap) -> bool {
        if !self.focus {
            return false;
        }

        if matches_binding(msg, &keymap.next_field) {
            self.active = self.active.next();
            return true;
        }
        if matches_binding(msg, &keymap.prev_field) {
            self.active = self.active.prev();
            return true;
        }
        if matches_binding(msg, &keymap.delete_digit) {
            let mut text = self.field_view(self.active);
            text.pop();
            self.set_field(self.active, &text);
            return true;
        }

        match msg.key {
            KeyCode::Char(c)
                if c.is_ascii_digit()
                    && !msg.modifiers.contains(KeyModifiers::CONTROL)
                    && !msg.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut text = self.field_view(self.active);
                text.push(c);
                self.set_field(self.active, &text);
                true
            }
            _ => false,
        }
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_defaults() {
        let editor = Model::new();
        assert_eq!(editor.field_view(Field::Hours), "00");
        assert_eq!(editor.field_view(Field::Minutes), "00");
        assert_eq!(editor.field_view(Field::Seconds), "30");
        assert_eq!(editor.requested_duration(), Duration::from_secs(30));
        assert!(!editor.focused());
    }

    #[test]
    fn test_clamp_every_value() {
        for field in Field::ALL {
            for n in -5i64..=120 {
                let mut editor = Model::new();
                editor.set_field(field, &n.to_string());
                let expected = n.clamp(0, i64::from(field.max()));
                assert_eq!(editor.value(field), expected as u8, "{field} <- {n}");
                assert_eq!(editor.field_view(field), format!("{:02}", expected));
            }
        }
    }

    #[test]
    fn test_non_numeric_is_zero() {
        let mut editor = Model::new();
        for raw in ["abc", "", "   ", "-", "+", "x12"] {
            editor.set_field(Field::Seconds, raw);
            assert_eq!(editor.field_view(Field::Seconds), "00", "input {raw:?}");
        }
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(normalize("  8", 59), 8);
        assert_eq!(normalize("+9", 59), 9);
        assert_eq!(normalize("5.9", 59), 5);
        assert_eq!(normalize("007", 23), 7);
        assert_eq!(normalize("99999999999999999999999", 23), 23);
        assert_eq!(normalize("-99999999999999999999999", 23), 0);
    }

    #[test]
    fn test_requested_duration() {
        let mut editor = Model::new();
        editor.set_field(Field::Hours, "1");
        editor.set_field(Field::Minutes, "2");
        editor.set_field(Field::Seconds, "3");
        assert_eq!(editor.requested_duration(), Duration::from_secs(3723));

        editor.set_field(Field::Seconds, "00");
        editor.set_field(Field::Minutes, "00");
        editor.set_field(Field::Hours, "00");
        assert_eq!(editor.requested_duration(), Duration::ZERO);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut editor = Model::new();
        editor.set_field(Field::Hours, "5");
        editor.set_field(Field::Minutes, "6");
        editor.set_field(Field::Seconds, "7");
        editor.reset();
        assert_eq!(editor.field_view(Field::Hours), "00");
        assert_eq!(editor.field_view(Field::Minutes), "00");
        assert_eq!(editor.field_view(Field::Seconds), "30");
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(Field::Hours.next(), Field::Minutes);
        assert_eq!(Field::Seconds.next(), Field::Hours);
        assert_eq!(Field::Hours.prev(), Field::Seconds);
        assert_eq!(Field::Minutes.prev(), Field::Hours);
    }

    #[test]
    fn test_typing_digits_shifts_in() {
        let keymap = default_key_map();
        let mut editor = Model::new();
        editor.focus();
        editor.set_active(Field::Minutes);

        assert!(editor.handle_key(&press(KeyCode::Char('1')), &keymap));
        assert_eq!(editor.field_view(Field::Minutes), "01");
        assert!(editor.handle_key(&press(KeyCode::Char('2')), &keymap));
        assert_eq!(editor.field_view(Field::Minutes), "12");
        // "129" clamps to the field maximum.
        assert!(editor.handle_key(&press(KeyCode::Char('9')), &keymap));
        assert_eq!(editor.field_view(Field::Minutes), "59");
    }

    #[test]
    fn test_backspace_drops_last_digit() {
        let keymap = default_key_map();
        let mut editor = Model::new();
        editor.focus();
        editor.set_field(Field::Hours, "12");

        assert!(editor.handle_key(&press(KeyCode::Backspace), &keymap));
        assert_eq!(editor.field_view(Field::Hours), "01");
        assert!(editor.handle_key(&press(KeyCode::Backspace), &keymap));
        assert_eq!(editor.field_view(Field::Hours), "00");
    }

    #[test]
    fn test_navigation_keys() {
        let keymap = default_key_map();
        let mut editor = Model::new();
        editor.focus();

        editor.handle_key(&press(KeyCode::Tab), &keymap);
        assert_eq!(editor.active(), Field::Minutes);
        editor.handle_key(&press(KeyCode::Right), &keymap);
        assert_eq!(editor.active(), Field::Seconds);
        editor.handle_key(&press(KeyCode::Left), &keymap);
        assert_eq!(editor.active(), Field::Minutes);
    }

    #[test]
    fn test_blurred_editor_ignores_keys() {
        let keymap = default_key_map();
        let mut editor = Model::new();
        assert!(!editor.handle_key(&press(KeyCode::Char('5')), &keymap));
        assert_eq!(editor.field_view(Field::Hours), "00");
    }

    #[test]
    fn test_letters_are_not_consumed() {
        let keymap = default_key_map();
        let mut editor = Model::new();
        editor.focus();
        assert!(!editor.handle_key(&press(KeyCode::Char('x')), &keymap));
        assert_eq!(editor.requested_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_custom_field_bindings() {
        let keymap = KeyMap {
            next_field: new_binding(vec![with_keys_str(&["n"]), with_help("n", "next")]),
            ..default_key_map()
        };
        let mut editor = Model::new();
        editor.focus();

        assert!(editor.handle_key(&press(KeyCode::Char('n')), &keymap));
        assert_eq!(editor.active(), Field::Minutes);
        // Tab is no longer bound, so it falls through unconsumed.
        assert!(!editor.handle_key(&press(KeyCode::Tab), &keymap));
        assert_eq!(editor.active(), Field::Minutes);
    }

    #[test]
    fn test_key_map_help() {
        let keymap = default_key_map();
        assert_eq!(keymap.short_help().len(), 2);
        let full = keymap.full_help();
        assert_eq!(full.len(), 1);
        assert_eq!(full[0][2].help().desc, "delete digit");
    }
}
