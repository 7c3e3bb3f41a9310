//! Key bindings for the moon timer component.

use crate::duration;
use crate::key::{new_binding, with_help, with_keys_str, Binding, KeyMap as KeyMapTrait};

/// Key bindings for the actions of the moon timer.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Start the countdown, or pause it while running.
    pub toggle: Binding,
    /// Stop the countdown and restore the default duration.
    pub reset: Binding,
    /// Bindings handed to the duration editor.
    pub fields: duration::KeyMap,
}

/// The default bindings: space/enter toggles, `r` resets, and the duration
/// editor's defaults for moving between fields and deleting digits.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        toggle: new_binding(vec![
            with_keys_str(&["space", "enter"]),
            with_help("space", "start"),
        ]),
        reset: new_binding(vec![with_keys_str(&["r"]), with_help("r", "reset")]),
        fields: duration::default_key_map(),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl KeyMapTrait for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle, &self.reset]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        let mut groups = vec![vec![&self.toggle, &self.reset]];
        groups.extend(self.fields.full_help());
        groups
    }
}
