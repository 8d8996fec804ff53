//! Main application state and logic

use crate::config::Config;
use crate::keyboard::keymap::qwerty_key_for;
use crate::keyboard::{KeyCode, KeyEvent, Keymap, KeyboardState};
use crate::report::SessionReport;
use crate::session::{BackspaceOutcome, KeystrokeOutcome, TypingSession};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    /// Passage finished; typing is ignored until a retry or backspace
    Completed,
    Quitting,
}

impl AppState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Typing => "TYPING",
            Self::Completed => "DONE",
            Self::Quitting => "QUIT",
        }
    }
}

/// Main application
pub struct App {
    /// Application state
    pub state: AppState,
    /// Configuration
    pub config: Config,
    /// Keyboard state tracker
    pub keyboard_state: KeyboardState,
    /// The passage being practiced
    pub session: TypingSession,
    /// Set by the first accepted keystroke
    pub start_time: Option<Instant>,
    /// Set when the passage is completed
    pub finish_time: Option<Instant>,
    /// Last status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, keymap: Arc<Keymap>) -> Self {
        let session = TypingSession::new(keymap, &config.lesson.passage);
        Self {
            state: AppState::Typing,
            config,
            keyboard_state: KeyboardState::new(),
            session,
            start_time: None,
            finish_time: None,
            status_message: None,
            status_time: None,
        }
    }

    /// Process a keyboard event and forward typeable presses to the session
    pub fn process_event(&mut self, event: &KeyEvent) -> Option<KeystrokeOutcome> {
        if self.state == AppState::Quitting {
            return None;
        }

        let keystroke = self.keyboard_state.process_event(event)?;
        if self.state != AppState::Typing {
            return None;
        }
        let outcome = self.session.process_keystroke(keystroke);

        if let KeystrokeOutcome::Accepted { completed, .. } = &outcome {
            self.start_time.get_or_insert_with(Instant::now);
            if *completed {
                self.finish_time = Some(Instant::now());
                self.state = AppState::Completed;
                let counts = self.session.counts();
                let accuracy = counts.accuracy_percent();
                if self.config.lesson.passed(accuracy) {
                    self.set_status(format!("Passed with {:.1}% accuracy", accuracy));
                } else {
                    self.set_status(format!(
                        "Completed at {:.1}%, below the {:.0}% target",
                        accuracy, self.config.lesson.min_accuracy
                    ));
                }
            }
        }
        Some(outcome)
    }

    /// Replay a character from a US QWERTY terminal as a physical key press.
    ///
    /// Shift is implied by the character itself; `altgr` adds right Alt.
    /// Characters with no key on the layout are dropped.
    pub fn handle_char(&mut self, c: char, altgr: bool) -> Option<KeystrokeOutcome> {
        let Some((key, shifted)) = qwerty_key_for(c) else {
            warn!("No physical key for {c:?}");
            return None;
        };

        let mut held = Vec::new();
        if shifted {
            held.push(KeyCode::LEFT_SHIFT);
        }
        if altgr {
            held.push(KeyCode::RIGHT_ALT);
        }

        let outcome = self.process_event(&KeyEvent::press_with(key, held));
        self.process_event(&KeyEvent::release(key));
        outcome
    }

    pub fn backspace(&mut self) -> BackspaceOutcome {
        if self.state == AppState::Quitting {
            return BackspaceOutcome::Ignored;
        }
        let outcome = self.session.backspace();
        if self.state == AppState::Completed && !self.session.is_completed() {
            self.state = AppState::Typing;
            self.finish_time = None;
        }
        outcome
    }

    /// Start the same passage over
    pub fn retry(&mut self) {
        self.session.reset();
        self.keyboard_state.reset();
        self.start_time = None;
        self.finish_time = None;
        self.state = AppState::Typing;
        self.set_status("Passage reset".to_string());
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Get status message if still valid (within 3 seconds)
    pub fn get_status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(msg), Some(time)) if time.elapsed().as_secs() < 3 => Some(msg),
            _ => None,
        }
    }

    /// Typing time so far, frozen once the passage is completed
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.finish_time) {
            (Some(start), Some(finish)) => finish.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.elapsed().as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }

    /// Generate a session report
    pub fn generate_report(&self) -> SessionReport {
        SessionReport::new(&self.session, &self.config.lesson, self.elapsed())
    }

    /// Export session report to JSON file
    pub fn export_report(&mut self, filename: &str) -> Result<String, std::io::Error> {
        let report = self.generate_report();
        let path = Path::new(filename);
        report.export_json(path)?;
        let msg = format!("Exported to {}", filename);
        info!("{msg}");
        self.set_status(msg.clone());
        Ok(msg)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default(), Keymap::remington_gail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(passage: &str) -> App {
        let mut config = Config::default();
        config.lesson.passage = passage.to_string();
        App::new(config, Keymap::remington_gail())
    }

    #[test]
    fn qwerty_chars_type_the_passage() {
        let mut app = app("कि");
        assert!(matches!(app.handle_char('f', false), Some(KeystrokeOutcome::Accepted { correct: true, .. })));
        assert!(app.start_time.is_some());
        app.handle_char('d', false);
        assert_eq!(app.state, AppState::Completed);
        assert_eq!(app.session.display_text(), "कि");
        assert!(app.get_status().unwrap().starts_with("Passed"));
    }

    #[test]
    fn shifted_char_implies_shift() {
        let mut app = app("स्त");
        let outcome = app.handle_char('L', false);
        assert_eq!(
            outcome,
            Some(KeystrokeOutcome::Accepted { cluster: "स्".into(), correct: true, completed: false })
        );
        assert!(app.keyboard_state.pressed_keys().is_empty());
    }

    #[test]
    fn altgr_flag_selects_altgr_output() {
        let mut app = app("॥");
        let outcome = app.handle_char('a', true);
        assert!(matches!(outcome, Some(KeystrokeOutcome::Accepted { correct: true, completed: true, .. })));
    }

    #[test]
    fn unknown_char_is_dropped() {
        let mut app = app("क");
        assert_eq!(app.handle_char('é', false), None);
        assert_eq!(app.session.cursor(), 0);
    }

    #[test]
    fn completed_ignores_typing_until_backspace() {
        let mut app = app("क");
        app.handle_char('d', false);
        assert_eq!(app.state, AppState::Completed);
        assert_eq!(app.handle_char('d', false), None);

        assert_eq!(app.backspace(), BackspaceOutcome::Removed);
        assert_eq!(app.state, AppState::Typing);
        assert!(app.finish_time.is_none());
    }

    #[test]
    fn backspace_that_stays_past_the_end_keeps_completed() {
        let mut app = app("ता");
        app.handle_char('r', false);
        app.handle_char('L', false);
        assert_eq!(app.state, AppState::Completed);
        let finished = app.finish_time;

        assert_eq!(app.backspace(), BackspaceOutcome::HalfFormCleared);
        assert_eq!(app.state, AppState::Completed);
        assert_eq!(app.finish_time, finished);

        // cursor 3 -> 2, still at the end of a two-codepoint target
        assert_eq!(app.backspace(), BackspaceOutcome::Removed);
        assert_eq!(app.state, AppState::Completed);

        assert_eq!(app.backspace(), BackspaceOutcome::Removed);
        assert_eq!(app.state, AppState::Typing);
        assert!(app.finish_time.is_none());
        assert!(matches!(app.handle_char('k', false), Some(KeystrokeOutcome::Accepted { .. })));
    }

    #[test]
    fn retry_starts_over() {
        let mut app = app("कि");
        app.handle_char('d', false);
        app.retry();
        assert_eq!(app.session.cursor(), 0);
        assert!(app.start_time.is_none());
        assert_eq!(app.elapsed_formatted(), "00:00");
        assert_eq!(app.get_status(), Some("Passage reset"));
    }

    #[test]
    fn quit_stops_input() {
        let mut app = app("क");
        app.quit();
        assert_eq!(app.handle_char('d', false), None);
        assert_eq!(app.backspace(), BackspaceOutcome::Ignored);
    }

    #[test]
    fn report_reflects_session() {
        let mut app = app("कि");
        app.handle_char('f', false);
        app.handle_char('d', false);
        let report = app.generate_report();
        assert!(report.summary.completed);
        assert_eq!(report.summary.keystrokes, 2);
    }
}
