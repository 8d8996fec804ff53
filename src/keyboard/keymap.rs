//! Physical key codes, key names and modifier classes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Represents a physical key code (Linux evdev scancode numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ESCAPE: Self = Self(1);
    pub const BACKSPACE: Self = Self(14);
    pub const TAB: Self = Self(15);
    pub const ENTER: Self = Self(28);
    pub const LEFT_CTRL: Self = Self(29);
    pub const LEFT_SHIFT: Self = Self(42);
    pub const RIGHT_SHIFT: Self = Self(54);
    pub const LEFT_ALT: Self = Self(56);
    pub const SPACE: Self = Self(57);
    pub const CAPS_LOCK: Self = Self(58);
    pub const RIGHT_CTRL: Self = Self(97);
    /// Right Alt, reported as AltGr on international layouts
    pub const RIGHT_ALT: Self = Self(100);
    pub const LEFT_META: Self = Self(125);
    pub const RIGHT_META: Self = Self(126);

    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Look a key up by its [`KeyInfo::name`] (`"D"`, `"Semicolon"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        KEYMAP
            .iter()
            .find(|(_, info)| info.name.eq_ignore_ascii_case(name))
            .map(|(code, _)| *code)
    }

    /// Display name, or `None` for an unnamed scancode
    pub fn name(&self) -> Option<&'static str> {
        KEYMAP.get(self).map(|info| info.name)
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl TryFrom<String> for KeyCode {
    type Error = String;

    /// Accepts a key name or a raw scancode
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(code) = Self::from_name(&value) {
            return Ok(code);
        }
        value
            .parse::<u16>()
            .map(Self)
            .map_err(|_| format!("unknown key name: {value}"))
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Name and keycap label of a physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInfo {
    /// Name used in layout files and logs
    pub name: &'static str,
    /// Short label as printed on a US keycap
    pub label: &'static str,
}

/// `(scancode, name, label)` for the keys of a US 104-key board
static KEY_NAMES: &[(u16, &str, &str)] = &[
    (1, "Escape", "Esc"),
    (59, "F1", "F1"), (60, "F2", "F2"), (61, "F3", "F3"), (62, "F4", "F4"),
    (63, "F5", "F5"), (64, "F6", "F6"), (65, "F7", "F7"), (66, "F8", "F8"),
    (67, "F9", "F9"), (68, "F10", "F10"), (87, "F11", "F11"), (88, "F12", "F12"),
    (41, "Grave", "`"), (2, "1", "1"), (3, "2", "2"), (4, "3", "3"), (5, "4", "4"),
    (6, "5", "5"), (7, "6", "6"), (8, "7", "7"), (9, "8", "8"), (10, "9", "9"),
    (11, "0", "0"), (12, "Minus", "-"), (13, "Equals", "="), (14, "Backspace", "Bksp"),
    (15, "Tab", "Tab"), (16, "Q", "Q"), (17, "W", "W"), (18, "E", "E"), (19, "R", "R"),
    (20, "T", "T"), (21, "Y", "Y"), (22, "U", "U"), (23, "I", "I"), (24, "O", "O"),
    (25, "P", "P"), (26, "LeftBracket", "["), (27, "RightBracket", "]"),
    (43, "Backslash", "\\"),
    (58, "CapsLock", "Caps"), (30, "A", "A"), (31, "S", "S"), (32, "D", "D"),
    (33, "F", "F"), (34, "G", "G"), (35, "H", "H"), (36, "J", "J"), (37, "K", "K"),
    (38, "L", "L"), (39, "Semicolon", ";"), (40, "Apostrophe", "'"), (28, "Enter", "Enter"),
    (42, "LeftShift", "Shift"), (44, "Z", "Z"), (45, "X", "X"), (46, "C", "C"),
    (47, "V", "V"), (48, "B", "B"), (49, "N", "N"), (50, "M", "M"), (51, "Comma", ","),
    (52, "Period", "."), (53, "Slash", "/"), (54, "RightShift", "Shift"),
    (29, "LeftCtrl", "Ctrl"), (125, "LeftMeta", "Win"), (56, "LeftAlt", "Alt"),
    (57, "Space", "Space"), (100, "RightAlt", "AltGr"), (126, "RightMeta", "Win"),
    (127, "Menu", "Menu"), (97, "RightCtrl", "Ctrl"),
    (103, "Up", "↑"), (105, "Left", "←"), (108, "Down", "↓"), (106, "Right", "→"),
    (110, "Insert", "Ins"), (102, "Home", "Home"), (104, "PageUp", "PgUp"),
    (111, "Delete", "Del"), (107, "End", "End"), (109, "PageDown", "PgDn"),
];

/// Key info indexed by scancode
pub static KEYMAP: LazyLock<HashMap<KeyCode, KeyInfo>> = LazyLock::new(|| {
    KEY_NAMES
        .iter()
        .map(|&(code, name, label)| (KeyCode(code), KeyInfo { name, label }))
        .collect()
});

/// Get key info by code, returns a placeholder if not found
pub fn get_key_info(code: KeyCode) -> KeyInfo {
    KEYMAP
        .get(&code)
        .copied()
        .unwrap_or(KeyInfo { name: "Unknown", label: "?" })
}

/// Which modifier family a modifier key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierClass {
    Shift,
    /// Right Alt
    AltGr,
    /// Left Alt; combined with Ctrl it acts as AltGr
    Alt,
    Ctrl,
    Meta,
    CapsLock,
}

/// Modifier keys and their families
pub const MODIFIER_KEYS: &[(KeyCode, ModifierClass)] = &[
    (KeyCode::LEFT_SHIFT, ModifierClass::Shift),
    (KeyCode::RIGHT_SHIFT, ModifierClass::Shift),
    (KeyCode::RIGHT_ALT, ModifierClass::AltGr),
    (KeyCode::LEFT_ALT, ModifierClass::Alt),
    (KeyCode::LEFT_CTRL, ModifierClass::Ctrl),
    (KeyCode::RIGHT_CTRL, ModifierClass::Ctrl),
    (KeyCode::LEFT_META, ModifierClass::Meta),
    (KeyCode::RIGHT_META, ModifierClass::Meta),
    (KeyCode::CAPS_LOCK, ModifierClass::CapsLock),
];

/// Editing, navigation and function keys that never produce text
pub const CONTROL_KEYS: &[KeyCode] = &[
    KeyCode::ESCAPE,
    KeyCode::BACKSPACE,
    KeyCode::TAB,
    KeyCode::ENTER,
    // F1-F10, F11, F12
    KeyCode(59), KeyCode(60), KeyCode(61), KeyCode(62), KeyCode(63),
    KeyCode(64), KeyCode(65), KeyCode(66), KeyCode(67), KeyCode(68),
    KeyCode(87), KeyCode(88),
    // Arrows
    KeyCode(103), KeyCode(105), KeyCode(106), KeyCode(108),
    // Navigation cluster and menu
    KeyCode(102), KeyCode(104), KeyCode(107), KeyCode(109),
    KeyCode(110), KeyCode(111), KeyCode(127),
];

pub fn modifier_class(key: KeyCode) -> Option<ModifierClass> {
    MODIFIER_KEYS
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, class)| *class)
}

pub fn is_modifier_key(key: KeyCode) -> bool {
    modifier_class(key).is_some()
}

/// A key that may produce text: neither a modifier nor a control key
pub fn is_typeable_key(key: KeyCode) -> bool {
    !is_modifier_key(key) && !CONTROL_KEYS.contains(&key)
}

/// US QWERTY legends: `(key, unshifted, shifted)`
static QWERTY_LEGENDS: &[(u16, char, char)] = &[
    (41, '`', '~'), (2, '1', '!'), (3, '2', '@'), (4, '3', '#'), (5, '4', '$'),
    (6, '5', '%'), (7, '6', '^'), (8, '7', '&'), (9, '8', '*'), (10, '9', '('),
    (11, '0', ')'), (12, '-', '_'), (13, '=', '+'),
    (16, 'q', 'Q'), (17, 'w', 'W'), (18, 'e', 'E'), (19, 'r', 'R'), (20, 't', 'T'),
    (21, 'y', 'Y'), (22, 'u', 'U'), (23, 'i', 'I'), (24, 'o', 'O'), (25, 'p', 'P'),
    (26, '[', '{'), (27, ']', '}'), (43, '\\', '|'),
    (30, 'a', 'A'), (31, 's', 'S'), (32, 'd', 'D'), (33, 'f', 'F'), (34, 'g', 'G'),
    (35, 'h', 'H'), (36, 'j', 'J'), (37, 'k', 'K'), (38, 'l', 'L'), (39, ';', ':'),
    (40, '\'', '"'),
    (44, 'z', 'Z'), (45, 'x', 'X'), (46, 'c', 'C'), (47, 'v', 'V'), (48, 'b', 'B'),
    (49, 'n', 'N'), (50, 'm', 'M'), (51, ',', '<'), (52, '.', '>'), (53, '/', '?'),
    (57, ' ', ' '),
];

/// Physical key behind a character as a US QWERTY terminal reports it,
/// plus whether Shift was needed to type it
pub fn qwerty_key_for(c: char) -> Option<(KeyCode, bool)> {
    QWERTY_LEGENDS.iter().find_map(|&(code, plain, shifted)| {
        if c == plain {
            Some((KeyCode(code), false))
        } else if c == shifted {
            Some((KeyCode(code), true))
        } else {
            None
        }
    })
}
