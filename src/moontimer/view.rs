//! View rendering for the moon timer component.

use super::model::Model;
use crate::countdown::State;
use crate::duration::Field;
use crate::key::{Binding, KeyMap as _};
use crate::Component;
use unicode_width::UnicodeWidthStr;

const FIELD_SEPARATOR: &str = " : ";
const HELP_SEPARATOR: &str = " • ";

/// Display width of `s` once ANSI escape sequences are removed.
pub(crate) fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi_escapes::strip_str(s).as_str())
}

fn center(line: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(line)) / 2;
    format!("{}{}", " ".repeat(pad), line)
}

impl Model {
    /// Renders the moon, the remaining time, the duration fields and the
    /// help line, each centered under the moon.
    pub fn view(&self) -> String {
        let width = self.moon.width();
        let mut lines = vec![self.moon.view_as(self.progress()), String::new()];

        lines.push(center(&self.time_view(), width));
        lines.push(center(&self.fields_view(), width));

        if self.show_help {
            lines.push(String::new());
            lines.extend(self.help_view().lines().map(|line| center(line, width)));
        }

        lines.join("\n")
    }

    /// The remaining time as a styled `HH:MM:SS` string.
    pub fn time_view(&self) -> String {
        self.time_style.render(&self.countdown.view())
    }

    /// The three duration fields, the active one highlighted while focused.
    pub fn fields_view(&self) -> String {
        Field::ALL
            .iter()
            .map(|&field| {
                let text = self.editor.field_view(field);
                if self.focused() && self.editor.active() == field {
                    self.active_field_style.render(&text)
                } else {
                    self.field_style.render(&text)
                }
            })
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR)
    }

    /// Help for the key bindings, one line per group. While focused every
    /// binding is listed, including the field editing keys; blurred, only
    /// toggle and reset. The toggle label follows the countdown state.
    pub fn help_view(&self) -> String {
        let groups = if self.focused() {
            self.keymap.full_help()
        } else {
            vec![self.keymap.short_help()]
        };

        groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter(|binding| binding.enabled())
                    .map(|binding| self.help_binding(binding))
                    .collect::<Vec<_>>()
                    .join(HELP_SEPARATOR)
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn help_binding(&self, binding: &Binding) -> String {
        let help = binding.help();
        if std::ptr::eq(binding, &self.keymap.toggle) {
            let desc = match self.countdown.state() {
                State::Running => "pause",
                State::Paused => "resume",
                State::Idle => "start",
            };
            return self.help_item(&help.key, desc);
        }
        self.help_item(&help.key, &help.desc)
    }

    fn help_item(&self, key: &str, desc: &str) -> String {
        format!(
            "{} {}",
            self.help_key_style.render(key),
            self.help_desc_style.render(desc)
        )
    }
}
