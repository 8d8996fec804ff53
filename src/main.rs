//! Hindi Typing Kit - Remington (GAIL) typing tutor for the terminal
//!
//! Practice a Devanagari passage on a US keyboard. Keys are read as their
//! physical positions and typed through the Remington layout; Alt stands in
//! for AltGr.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode as CtKeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Env, Target};
use log::{info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::fs::File;
use std::io::stdout;

use hindi_typing_kit::{
    config::{app_dir, Config},
    ui::{App, AppState, HintLine, PassagePanel, StatsPanel, StatusBar, TypedPanel},
};

/// Route logs to a file so they never draw over the TUI
fn init_logging(config: &Config) {
    let Ok(dir) = app_dir() else {
        return;
    };
    let Ok(file) = File::create(dir.join(&config.logging.file)) else {
        return;
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(config.logging.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = config_error {
        warn!("Using default config: {e}");
    }

    let keymap = config.keymap()?;
    info!("Layout: {}", keymap.layout().name);
    let tick_rate = config.refresh_interval();
    let mut app = App::new(config, keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        let segments = app.session.display_segments();
        let next = app.session.next_expected();

        terminal.draw(|frame| {
            let size = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5), // Passage
                    Constraint::Min(5),    // Typed text and stats
                    Constraint::Length(1), // Hint
                    Constraint::Length(1), // Status bar
                ])
                .split(size);

            frame.render_widget(PassagePanel::new(app.session.passage()), chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20), Constraint::Length(24)])
                .split(chunks[1]);
            frame.render_widget(TypedPanel::new(&segments), middle[0]);
            frame.render_widget(
                StatsPanel::new(
                    app.session.counts(),
                    app.session.cursor(),
                    app.config.lesson.min_accuracy,
                ),
                middle[1],
            );

            if app.config.ui.show_hint || next.is_none() {
                frame.render_widget(HintLine::new(next.as_ref()), chunks[2]);
            }

            let elapsed = app.elapsed_formatted();
            let layout_name = app.session.keymap().layout().name.as_str();
            let status = StatusBar::new(app.state.name(), layout_name, &elapsed)
                .message(app.get_status());
            frame.render_widget(status, chunks[3]);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_only = key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT);
                match key.code {
                    CtKeyCode::Esc => app.quit(),
                    CtKeyCode::Char('r') if ctrl_only => app.retry(),
                    CtKeyCode::Char('e') if ctrl_only => {
                        let filename = format!(
                            "typing_report_{}.json",
                            chrono::Utc::now().format("%Y%m%d_%H%M%S")
                        );
                        if let Err(e) = app.export_report(&filename) {
                            warn!("Export failed: {e}");
                            app.set_status(format!("Export failed: {}", e));
                        }
                    }
                    CtKeyCode::Char('c') if ctrl_only => app.quit(),
                    CtKeyCode::Backspace => {
                        app.backspace();
                    }
                    CtKeyCode::Char(c) => {
                        app.handle_char(c, key.modifiers.contains(KeyModifiers::ALT));
                    }
                    _ => {}
                }
            }
        }

        if app.state == AppState::Quitting {
            break;
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let counts = app.session.counts();
    println!("\nHindi Typing Kit session complete.");
    println!("Typed: {}", app.session.display_text());
    println!(
        "Accuracy: {:.1}% ({} errors in {} keystrokes)",
        counts.accuracy_percent(),
        counts.errors,
        counts.keystrokes
    );
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}
