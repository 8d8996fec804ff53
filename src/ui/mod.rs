//! Terminal User Interface components

mod app;
mod widgets;

pub use app::{App, AppState};
pub use widgets::*;
