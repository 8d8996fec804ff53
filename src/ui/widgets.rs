//! Custom TUI widgets

use crate::keyboard::{get_key_info, KeyBinding, ModifierState};
use crate::session::{NextInput, SessionCounts};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// The passage to practice
pub struct PassagePanel<'a> {
    passage: &'a str,
}

impl<'a> PassagePanel<'a> {
    pub fn new(passage: &'a str) -> Self {
        Self { passage }
    }
}

impl<'a> Widget for PassagePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Passage")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        Paragraph::new(self.passage)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

/// What has been typed so far, wrong runs in red
pub struct TypedPanel<'a> {
    segments: &'a [(String, bool)],
}

impl<'a> TypedPanel<'a> {
    pub fn new(segments: &'a [(String, bool)]) -> Self {
        Self { segments }
    }
}

impl<'a> Widget for TypedPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Typed")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let spans: Vec<Span> = self
            .segments
            .iter()
            .map(|(text, is_error)| {
                let style = if *is_error {
                    Style::default().fg(Color::White).bg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                };
                Span::styled(text.as_str(), style)
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

/// The next unit to type and the key chord for it
pub struct HintLine<'a> {
    next: Option<&'a NextInput>,
}

impl<'a> HintLine<'a> {
    pub fn new(next: Option<&'a NextInput>) -> Self {
        Self { next }
    }

    fn chord(binding: &KeyBinding) -> String {
        let label = get_key_info(binding.key).label;
        match binding.state {
            ModifierState::Normal => label.to_string(),
            state => format!("{}+{}", state.label(), label),
        }
    }
}

impl<'a> Widget for HintLine<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.next {
            None => Line::from(Span::styled(
                " Done. Ctrl+R to retry, Ctrl+E to export, Esc to quit",
                Style::default().fg(Color::Green),
            )),
            Some(next) => {
                let keys = if next.bindings.is_empty() {
                    Span::styled("not on this layout", Style::default().fg(Color::Red))
                } else {
                    let chords: Vec<String> = next.bindings.iter().map(Self::chord).collect();
                    Span::styled(chords.join(" or "), Style::default().fg(Color::Yellow))
                };
                Line::from(vec![
                    Span::styled(" Next: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{} ", next.unit),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("key ", Style::default().fg(Color::DarkGray)),
                    keys,
                ])
            }
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Progress and accuracy
pub struct StatsPanel {
    counts: SessionCounts,
    cursor: usize,
    min_accuracy: f64,
}

impl StatsPanel {
    pub fn new(counts: SessionCounts, cursor: usize, min_accuracy: f64) -> Self {
        Self { counts, cursor, min_accuracy }
    }
}

impl Widget for StatsPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Stats")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let inner = block.inner(area);
        block.render(area, buf);

        let accuracy = self.counts.accuracy_percent();
        let accuracy_color = if accuracy >= self.min_accuracy { Color::Green } else { Color::Red };
        let progress = self.cursor.min(self.counts.target_codepoints);

        let rows = [
            ("Progress", format!("{}/{}", progress, self.counts.target_codepoints), Color::Cyan),
            ("Keystrokes", self.counts.keystrokes.to_string(), Color::Cyan),
            ("Errors", self.counts.errors.to_string(), Color::Yellow),
            ("Accuracy", format!("{:.1}%", accuracy), accuracy_color),
        ];

        for (i, (label, value, color)) in rows.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled(
                    format!("{}: ", label),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.as_str(), Style::default().fg(*color)),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    state: &'a str,
    layout: &'a str,
    elapsed: &'a str,
    message: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a str, layout: &'a str, elapsed: &'a str) -> Self {
        Self {
            state,
            layout,
            elapsed,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf.set_string(x, area.y, " ", bg_style);
        }

        // Left side: state and layout
        let left = format!(" {} | {} ", self.state, self.layout);
        buf.set_string(area.x, area.y, &left, bg_style.add_modifier(Modifier::BOLD));

        // Center: message if any
        if let Some(msg) = self.message {
            let msg_style = Style::default().bg(Color::DarkGray).fg(Color::Yellow);
            let msg_x = area.x + (area.width / 2).saturating_sub(msg.chars().count() as u16 / 2);
            buf.set_string(msg_x, area.y, msg, msg_style);
        }

        // Right side: elapsed time and key help
        let right = format!(" {} | Esc quit  ^R retry  ^E export  Alt=AltGr ", self.elapsed);
        let right_x = area.x + area.width.saturating_sub(right.len() as u16);
        buf.set_string(right_x, area.y, &right, bg_style);
    }
}
