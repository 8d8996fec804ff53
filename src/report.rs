//! Session report and export functionality

use crate::config::LessonConfig;
use crate::session::TypingSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Complete session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// What was practiced
    pub lesson: LessonSummary,
    /// Summary statistics
    pub summary: SessionSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Layout the session was typed on
    pub layout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSummary {
    pub passage: String,
    /// What the typist produced, as display text
    pub typed_text: String,
    pub min_accuracy: f64,
}

/// Session summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub keystrokes: u64,
    pub typed_codepoints: usize,
    pub target_codepoints: usize,
    pub errors: usize,
    pub accuracy_percent: f64,
    pub completed: bool,
    /// Completed with accuracy at or above the lesson threshold
    pub passed: bool,
    /// Elapsed time as measured by the caller
    pub elapsed_secs: f64,
}

impl SessionReport {
    /// Create a new session report
    pub fn new(session: &TypingSession, lesson: &LessonConfig, elapsed: Duration) -> Self {
        let now: DateTime<Utc> = Utc::now();
        let counts = session.counts();
        let accuracy_percent = counts.accuracy_percent();
        let completed = session.is_completed();

        Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                layout: session.keymap().layout().name.clone(),
            },
            lesson: LessonSummary {
                passage: session.passage().to_string(),
                typed_text: session.display_text(),
                min_accuracy: lesson.min_accuracy,
            },
            summary: SessionSummary {
                keystrokes: counts.keystrokes,
                typed_codepoints: counts.typed_codepoints,
                target_codepoints: counts.target_codepoints,
                errors: counts.errors,
                accuracy_percent,
                completed,
                passed: completed && lesson.passed(accuracy_percent),
                elapsed_secs: elapsed.as_secs_f64(),
            },
        }
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{KeyCode, Keymap, ModifierState};

    fn typed_session() -> TypingSession {
        let mut session = TypingSession::new(Keymap::remington_gail(), "कि");
        session.press(KeyCode(33), ModifierState::Normal);
        session.press(KeyCode(32), ModifierState::Normal);
        session
    }

    #[test]
    fn summarizes_a_clean_run() {
        let report = SessionReport::new(&typed_session(), &LessonConfig::default(), Duration::from_secs(3));
        assert_eq!(report.summary.keystrokes, 2);
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.summary.accuracy_percent, 100.0);
        assert!(report.summary.completed);
        assert!(report.summary.passed);
        assert_eq!(report.lesson.typed_text, "कि");
        assert_eq!(report.metadata.layout, "Remington (GAIL)");
    }

    #[test]
    fn unfinished_run_does_not_pass() {
        let session = TypingSession::new(Keymap::remington_gail(), "कि");
        let report = SessionReport::new(&session, &LessonConfig::default(), Duration::ZERO);
        assert!(!report.summary.completed);
        assert!(!report.summary.passed);
    }

    #[test]
    fn json_contains_sections() {
        let report = SessionReport::new(&typed_session(), &LessonConfig::default(), Duration::from_secs(1));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"accuracy_percent\""));
        assert!(json.contains("कि"));

        let parsed: SessionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary.typed_codepoints, 2);
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!("hindi-typing-kit-report-{}.json", std::process::id()));
        let report = SessionReport::new(&typed_session(), &LessonConfig::default(), Duration::from_secs(1));
        report.export_json(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"passed\": true"));
        let _ = std::fs::remove_file(&path);
    }
}
