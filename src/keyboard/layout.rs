//! Keyboard layout definitions and the keymap lookup context
//!
//! A [`KeyboardLayout`] is the serializable table of what every physical key
//! types in each of the four modifier states. [`Keymap`] wraps a validated
//! layout with the indexes needed at typing time: forward lookup by key and
//! a reverse index from output cluster to the keys that produce it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use super::{KeyCode, ModifierState};
use crate::error::LayoutError;

/// Which hand presses a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Fingers 0-4 are the left hand (little to thumb), 5-9 the right
    /// (thumb to little)
    pub fn for_finger(finger: u8) -> Option<Self> {
        match finger {
            0..=4 => Some(Self::Left),
            5..=9 => Some(Self::Right),
            _ => None,
        }
    }
}

/// What a key types in each modifier state. Empty means nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOutputs {
    #[serde(default)]
    pub normal: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub altgr: String,
    #[serde(default)]
    pub altgr_shift: String,
}

impl KeyOutputs {
    pub fn new(normal: &str, shift: &str, altgr: &str, altgr_shift: &str) -> Self {
        Self {
            normal: normal.to_string(),
            shift: shift.to_string(),
            altgr: altgr.to_string(),
            altgr_shift: altgr_shift.to_string(),
        }
    }

    pub fn get(&self, state: ModifierState) -> &str {
        match state {
            ModifierState::Normal => &self.normal,
            ModifierState::Shift => &self.shift,
            ModifierState::AltGr => &self.altgr,
            ModifierState::AltGrShift => &self.altgr_shift,
        }
    }
}

/// One physical key of a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapping {
    pub key: KeyCode,
    pub outputs: KeyOutputs,
    /// 0 = left little ... 4 = left thumb, 5 = right thumb ... 9 = right little
    pub finger: u8,
    pub hand: Hand,
}

impl KeyMapping {
    /// Mapping with the hand derived from the finger
    pub fn new(key: KeyCode, outputs: KeyOutputs, finger: u8) -> Self {
        Self {
            key,
            outputs,
            finger,
            hand: Hand::for_finger(finger).unwrap_or(Hand::Right),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub keys: Vec<KeyMapping>,
}

/// A named, ordered set of key rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub name: String,
    pub rows: Vec<LayoutRow>,
}

impl KeyboardLayout {
    /// Check the structural invariants: at least one key, no key mapped
    /// twice, every finger in range and on the declared hand
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        for mapping in self.keys() {
            if !seen.insert(mapping.key) {
                return Err(LayoutError::DuplicateKey(mapping.key));
            }
            match Hand::for_finger(mapping.finger) {
                None => {
                    return Err(LayoutError::FingerOutOfRange {
                        key: mapping.key,
                        finger: mapping.finger,
                    })
                }
                Some(hand) if hand != mapping.hand => {
                    return Err(LayoutError::HandMismatch {
                        key: mapping.key,
                        finger: mapping.finger,
                        hand: mapping.hand,
                    })
                }
                Some(_) => {}
            }
        }
        if seen.is_empty() {
            return Err(LayoutError::Empty);
        }
        Ok(())
    }

    /// Every key, row by row
    pub fn keys(&self) -> impl Iterator<Item = &KeyMapping> {
        self.rows.iter().flat_map(|row| row.keys.iter())
    }

    /// Parse and validate a layout from TOML
    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        let layout: KeyboardLayout = toml::from_str(contents)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout file
    pub fn load_from(path: &Path) -> Result<Self, LayoutError> {
        let contents = fs::read_to_string(path)?;
        let layout = Self::from_toml_str(&contents)?;
        log::info!("Loaded layout {:?} from {}", layout.name, path.display());
        Ok(layout)
    }
}

/// A key together with the modifier state it must be pressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub state: ModifierState,
}

/// Validated layout plus lookup indexes, shared read-only between sessions
#[derive(Debug)]
pub struct Keymap {
    layout: KeyboardLayout,
    by_key: HashMap<KeyCode, (usize, usize)>,
    reverse: HashMap<String, Vec<KeyBinding>>,
}

static REMINGTON_GAIL: LazyLock<Arc<Keymap>> =
    LazyLock::new(|| Arc::new(Keymap::build(super::remington::remington_gail())));

impl Keymap {
    /// Validate `layout` and build its indexes
    pub fn new(layout: KeyboardLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self::build(layout))
    }

    /// The built-in Remington GAIL keymap, built once per process
    pub fn remington_gail() -> Arc<Keymap> {
        Arc::clone(&REMINGTON_GAIL)
    }

    fn build(layout: KeyboardLayout) -> Self {
        let mut by_key = HashMap::new();
        let mut reverse: HashMap<String, Vec<KeyBinding>> = HashMap::new();

        for (row_idx, row) in layout.rows.iter().enumerate() {
            for (col_idx, mapping) in row.keys.iter().enumerate() {
                by_key.insert(mapping.key, (row_idx, col_idx));
                for state in ModifierState::ALL {
                    let output = mapping.outputs.get(state);
                    if output.is_empty() {
                        continue;
                    }
                    reverse
                        .entry(output.to_string())
                        .or_default()
                        .push(KeyBinding { key: mapping.key, state });
                }
            }
        }

        log::debug!(
            "Indexed layout {:?}: {} keys, {} distinct outputs",
            layout.name,
            by_key.len(),
            reverse.len()
        );

        Self { layout, by_key, reverse }
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn mapping(&self, key: KeyCode) -> Option<&KeyMapping> {
        let &(row, col) = self.by_key.get(&key)?;
        self.layout.rows.get(row)?.keys.get(col)
    }

    /// Output of `key` in `state`; empty for an unknown key or empty slot
    pub fn character_for(&self, key: KeyCode, state: ModifierState) -> &str {
        self.mapping(key).map_or("", |m| m.outputs.get(state))
    }

    /// Every (key, state) that types exactly `cluster`, in row/column order
    /// and then modifier order
    pub fn keys_producing(&self, cluster: &str) -> &[KeyBinding] {
        self.reverse.get(cluster).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> KeyboardLayout {
        KeyboardLayout {
            name: "test".into(),
            rows: vec![LayoutRow {
                keys: vec![
                    KeyMapping::new(KeyCode(30), KeyOutputs::new("a", "A", "", ""), 0),
                    KeyMapping::new(KeyCode(31), KeyOutputs::new("s", "A", "", ""), 1),
                ],
            }],
        }
    }

    #[test]
    fn hand_follows_finger() {
        assert_eq!(Hand::for_finger(0), Some(Hand::Left));
        assert_eq!(Hand::for_finger(4), Some(Hand::Left));
        assert_eq!(Hand::for_finger(5), Some(Hand::Right));
        assert_eq!(Hand::for_finger(10), None);
    }

    #[test]
    fn forward_lookup() {
        let keymap = Keymap::new(small_layout()).unwrap();
        assert_eq!(keymap.character_for(KeyCode(30), ModifierState::Shift), "A");
        assert_eq!(keymap.character_for(KeyCode(30), ModifierState::AltGr), "");
        assert_eq!(keymap.character_for(KeyCode(99), ModifierState::Normal), "");
    }

    #[test]
    fn reverse_lookup_is_ordered() {
        let keymap = Keymap::new(small_layout()).unwrap();
        let bindings = keymap.keys_producing("A");
        assert_eq!(
            bindings,
            &[
                KeyBinding { key: KeyCode(30), state: ModifierState::Shift },
                KeyBinding { key: KeyCode(31), state: ModifierState::Shift },
            ]
        );
        assert!(keymap.keys_producing("z").is_empty());
    }

    #[test]
    fn rejects_duplicate_keys() {
        let mut layout = small_layout();
        layout.rows[0].keys[1].key = KeyCode(30);
        assert!(matches!(layout.validate(), Err(LayoutError::DuplicateKey(KeyCode(30)))));
    }

    #[test]
    fn rejects_bad_fingers() {
        let mut layout = small_layout();
        layout.rows[0].keys[0].finger = 11;
        assert!(matches!(layout.validate(), Err(LayoutError::FingerOutOfRange { .. })));

        let mut layout = small_layout();
        layout.rows[0].keys[0].hand = Hand::Right;
        assert!(matches!(layout.validate(), Err(LayoutError::HandMismatch { .. })));
    }

    #[test]
    fn rejects_empty_layout() {
        let layout = KeyboardLayout { name: "empty".into(), rows: vec![] };
        assert!(matches!(Keymap::new(layout), Err(LayoutError::Empty)));
    }

    #[test]
    fn parses_toml_layout() {
        let toml_str = r#"
name = "tiny"

[[rows]]

[[rows.keys]]
key = "D"
finger = 2
hand = "left"
outputs = { normal = "क", shift = "क्" }

[[rows.keys]]
key = "Semicolon"
finger = 9
hand = "right"
outputs = { normal = "य", shift = "रू", altgr = "ॐ" }
"#;
        let layout = KeyboardLayout::from_toml_str(toml_str).unwrap();
        let keymap = Keymap::new(layout).unwrap();
        assert_eq!(keymap.character_for(KeyCode(32), ModifierState::Shift), "क्");
        assert_eq!(keymap.character_for(KeyCode(39), ModifierState::AltGr), "ॐ");
        assert_eq!(keymap.character_for(KeyCode(39), ModifierState::AltGrShift), "");
    }

    #[test]
    fn toml_with_unknown_key_name_fails() {
        let toml_str = r#"
name = "bad"
[[rows]]
[[rows.keys]]
key = "NotAKey"
finger = 2
hand = "left"
outputs = { normal = "x" }
"#;
        assert!(matches!(KeyboardLayout::from_toml_str(toml_str), Err(LayoutError::Parse(_))));
    }
}
