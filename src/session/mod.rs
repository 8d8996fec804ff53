//! Typing session validation
//!
//! A [`TypingSession`] compares every keystroke against the decomposed
//! passage codepoint by codepoint. Wrong keys are recorded, never rejected:
//! the cursor always advances by the length of what the key typed, and the
//! positions it covered are marked as errors. Backspace undoes one codepoint
//! at a time, except directly after a multi-codepoint half form, where the
//! first backspace only clears the half-form flag.

mod hint;

pub use hint::{next_expected, NextInput};

use log::{debug, info, trace};
use std::collections::BTreeSet;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use crate::keyboard::{is_typeable_key, KeyCode, Keymap, Keystroke, ModifierState};
use crate::script::chars::HALANT;
use crate::script::{decompose, recompose};

/// What a keystroke did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// Session finished, key not typeable, or key types nothing in this state
    Ignored,
    Accepted {
        cluster: String,
        correct: bool,
        /// This keystroke reached the end of the passage
        completed: bool,
    },
}

/// What a backspace did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackspaceOutcome {
    /// Nothing typed yet
    Ignored,
    /// Only the half-form flag was cleared; the buffer is unchanged
    HalfFormCleared,
    /// One codepoint was removed
    Removed,
}

/// Running counters for a statistics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionCounts {
    pub keystrokes: u64,
    pub typed_codepoints: usize,
    pub target_codepoints: usize,
    pub errors: usize,
}

impl SessionCounts {
    /// Share of typed codepoints that were correct, 100 before any typing
    pub fn accuracy_percent(&self) -> f64 {
        if self.typed_codepoints == 0 {
            return 100.0;
        }
        let correct = self.typed_codepoints.saturating_sub(self.errors);
        correct as f64 * 100.0 / self.typed_codepoints as f64
    }
}

/// Live typing session over one passage
pub struct TypingSession {
    keymap: Arc<Keymap>,
    passage: String,
    /// Passage in keystroke order, fixed for the session
    target: Vec<char>,
    cursor: usize,
    typed: Vec<char>,
    errors: BTreeSet<usize>,
    /// Last keystroke typed a multi-codepoint half form
    pending_half_form: bool,
    keystrokes: u64,
}

impl TypingSession {
    pub fn new(keymap: Arc<Keymap>, passage: &str) -> Self {
        let target: Vec<char> = decompose(passage).chars().collect();
        debug!(
            "New session: {} composed codepoints, {} keyed",
            passage.chars().count(),
            target.len()
        );
        Self {
            keymap,
            passage: passage.to_string(),
            target,
            cursor: 0,
            typed: Vec::new(),
            errors: BTreeSet::new(),
            pending_half_form: false,
            keystrokes: 0,
        }
    }

    /// Start over on the same passage
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.typed.clear();
        self.errors.clear();
        self.pending_half_form = false;
        self.keystrokes = 0;
        info!("Session reset");
    }

    pub fn process_keystroke(&mut self, keystroke: Keystroke) -> KeystrokeOutcome {
        self.press(keystroke.key, keystroke.state)
    }

    /// Apply one key press made in `state`
    pub fn press(&mut self, key: KeyCode, state: ModifierState) -> KeystrokeOutcome {
        if self.is_completed() || !is_typeable_key(key) {
            return KeystrokeOutcome::Ignored;
        }
        let cluster = self.keymap.character_for(key, state).to_string();
        if cluster.is_empty() {
            trace!("{key} in {state:?} types nothing");
            return KeystrokeOutcome::Ignored;
        }

        let n = cluster.chars().count();
        let start = self.cursor;
        let end = (start + n).min(self.target.len());
        let correct = cluster.chars().nfc().eq(self.target[start..end].iter().copied().nfc());

        self.typed.extend(cluster.chars());
        self.cursor += n;
        if !correct {
            self.errors.extend(start..self.cursor);
        }
        self.pending_half_form = n >= 2 && cluster.ends_with(HALANT);
        self.keystrokes += 1;

        let completed = self.is_completed();
        trace!(
            "{key} {state:?} -> {cluster:?} at {start}: {}",
            if correct { "ok" } else { "mismatch" }
        );
        if completed {
            info!(
                "Passage completed: {} keystrokes, {} errors",
                self.keystrokes,
                self.errors.len()
            );
        }

        KeystrokeOutcome::Accepted { cluster, correct, completed }
    }

    pub fn backspace(&mut self) -> BackspaceOutcome {
        if self.cursor == 0 {
            return BackspaceOutcome::Ignored;
        }
        if self.pending_half_form {
            self.pending_half_form = false;
            debug!("Backspace cleared half-form flag at {}", self.cursor);
            return BackspaceOutcome::HalfFormCleared;
        }
        self.cursor -= 1;
        self.typed.pop();
        self.errors.remove(&self.cursor);
        debug!("Backspace to {}", self.cursor);
        BackspaceOutcome::Removed
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    /// Passage in keystroke order
    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn typed_buffer(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn error_positions(&self) -> &BTreeSet<usize> {
        &self.errors
    }

    pub fn pending_half_form(&self) -> bool {
        self.pending_half_form
    }

    pub fn is_completed(&self) -> bool {
        self.cursor >= self.target.len()
    }

    pub fn keymap(&self) -> &Arc<Keymap> {
        &self.keymap
    }

    /// The typed buffer as readable text
    pub fn display_text(&self) -> String {
        recompose(&self.typed_buffer())
    }

    /// Display text split into runs of correct and wrong codepoints, each
    /// recomposed on its own: `(text, is_error)`
    pub fn display_segments(&self) -> Vec<(String, bool)> {
        let mut segments = Vec::new();
        let mut run = String::new();
        let mut run_is_error = false;
        for (pos, c) in self.typed.iter().enumerate() {
            let is_error = self.errors.contains(&pos);
            if is_error != run_is_error && !run.is_empty() {
                segments.push((recompose(&run), run_is_error));
                run.clear();
            }
            run_is_error = is_error;
            run.push(*c);
        }
        if !run.is_empty() {
            segments.push((recompose(&run), run_is_error));
        }
        segments
    }

    pub fn next_expected(&self) -> Option<NextInput> {
        next_expected(&self.target, self.cursor, &self.keymap)
    }

    pub fn counts(&self) -> SessionCounts {
        SessionCounts {
            keystrokes: self.keystrokes,
            typed_codepoints: self.typed.len(),
            target_codepoints: self.target.len(),
            errors: self.errors.len(),
        }
    }
}
