//! Keyboard state tracking and modifier resolution

use super::keymap::{is_typeable_key, modifier_class, ModifierClass};
use super::{KeyCode, KeyEvent, KeyEventType};
use serde::{Deserialize, Serialize};

/// Which of a key's four outputs is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierState {
    #[default]
    Normal,
    Shift,
    AltGr,
    AltGrShift,
}

impl ModifierState {
    /// All states in lookup order
    pub const ALL: [ModifierState; 4] = [Self::Normal, Self::Shift, Self::AltGr, Self::AltGrShift];

    /// Human readable chord, e.g. `"AltGr+Shift"`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Shift => "Shift",
            Self::AltGr => "AltGr",
            Self::AltGrShift => "AltGr+Shift",
        }
    }
}

/// Collapse a set of held keys into one modifier state.
///
/// Left and right variants are equivalent. Right Alt counts as AltGr, and so
/// does Ctrl held together with left Alt (the way Windows reports AltGr).
/// Meta and Caps Lock do not participate.
pub fn resolve_modifier_state<'a>(held: impl IntoIterator<Item = &'a KeyCode>) -> ModifierState {
    let (mut shift, mut altgr, mut alt, mut ctrl) = (false, false, false, false);
    for key in held {
        match modifier_class(*key) {
            Some(ModifierClass::Shift) => shift = true,
            Some(ModifierClass::AltGr) => altgr = true,
            Some(ModifierClass::Alt) => alt = true,
            Some(ModifierClass::Ctrl) => ctrl = true,
            _ => {}
        }
    }
    let altgr = altgr || (alt && ctrl);
    match (shift, altgr) {
        (true, true) => ModifierState::AltGrShift,
        (false, true) => ModifierState::AltGr,
        (true, false) => ModifierState::Shift,
        (false, false) => ModifierState::Normal,
    }
}

/// A typeable key press with the modifier state it was made in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: KeyCode,
    pub state: ModifierState,
}

/// Overall keyboard state
pub struct KeyboardState {
    /// Currently pressed keys, in press order
    pressed_keys: Vec<KeyCode>,
    /// Total events processed
    total_events: u64,
    /// Typeable presses forwarded
    keystrokes: u64,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            pressed_keys: Vec::new(),
            total_events: 0,
            keystrokes: 0,
        }
    }

    /// Process a key event and update state.
    ///
    /// Returns the keystroke to forward when the event is a typeable press.
    /// Modifiers count as held if either this tracker saw them go down or the
    /// host listed them on the event.
    pub fn process_event(&mut self, event: &KeyEvent) -> Option<Keystroke> {
        self.total_events += 1;

        match event.event_type {
            KeyEventType::Press => {
                if !self.pressed_keys.contains(&event.key) {
                    self.pressed_keys.push(event.key);
                }
                if !is_typeable_key(event.key) {
                    return None;
                }
                self.keystrokes += 1;
                let state = resolve_modifier_state(self.pressed_keys.iter().chain(&event.held));
                Some(Keystroke { key: event.key, state })
            }
            KeyEventType::Release => {
                self.pressed_keys.retain(|k| *k != event.key);
                None
            }
        }
    }

    /// Modifier state derived from the keys currently held
    pub fn modifier_state(&self) -> ModifierState {
        resolve_modifier_state(&self.pressed_keys)
    }

    /// Get all currently pressed keys
    pub fn pressed_keys(&self) -> &[KeyCode] {
        &self.pressed_keys
    }

    /// Get total event count
    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    pub fn keystrokes(&self) -> u64 {
        self.keystrokes
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        self.pressed_keys.clear();
        self.total_events = 0;
        self.keystrokes = 0;
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}
