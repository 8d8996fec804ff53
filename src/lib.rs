//! Hindi Typing Kit - Devanagari typing tutor for the Remington (GAIL) layout
//!
//! Passages are practiced in keystroke order: [`script::decompose`] turns
//! composed Hindi into the sequence a Remington typist keys it in, and
//! [`script::recompose`] turns typed text back into readable Devanagari.
//! A [`session::TypingSession`] validates keystrokes against the decomposed
//! passage using the layout in [`keyboard`].

pub mod config;
pub mod error;
pub mod keyboard;
pub mod report;
pub mod script;
pub mod session;
pub mod ui;

pub use config::Config;
