//! Keyboard events, modifier state and the layout mapping

mod event;
mod state;
pub mod keymap;
pub mod layout;
pub mod remington;

pub use event::{KeyEvent, KeyEventType};
pub use state::{resolve_modifier_state, KeyboardState, Keystroke, ModifierState};
pub use keymap::{get_key_info, is_modifier_key, is_typeable_key, KeyCode, KeyInfo, KEYMAP};
pub use layout::{Hand, KeyBinding, KeyMapping, KeyOutputs, Keymap, KeyboardLayout, LayoutRow};
