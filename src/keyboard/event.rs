//! Keyboard event types

use super::KeyCode;
use std::time::Instant;

/// Type of keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key was pressed down
    Press,
    /// Key was released
    Release,
}

/// A keyboard event as delivered by the host
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// The key code
    pub key: KeyCode,
    /// Type of event (press/release)
    pub event_type: KeyEventType,
    /// Modifier keys the host reports as held during a press
    pub held: Vec<KeyCode>,
    /// When the event occurred
    pub timestamp: Instant,
}

impl KeyEvent {
    pub fn new(key: KeyCode, event_type: KeyEventType, held: Vec<KeyCode>, timestamp: Instant) -> Self {
        Self {
            key,
            event_type,
            held,
            timestamp,
        }
    }

    pub fn press(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Press, Vec::new(), Instant::now())
    }

    /// Press with the modifiers the host saw held at the time
    pub fn press_with(key: KeyCode, held: Vec<KeyCode>) -> Self {
        Self::new(key, KeyEventType::Press, held, Instant::now())
    }

    pub fn release(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Release, Vec::new(), Instant::now())
    }
}
