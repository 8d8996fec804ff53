//! Error types for layout loading and configuration
//!
//! The composition engine and the typing session never fail; these errors
//! only come from reading files the user supplies.

use std::io;
use thiserror::Error;

use crate::keyboard::KeyCode;

/// Error type for keyboard layout definitions
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("key {0} is mapped more than once")]
    DuplicateKey(KeyCode),
    #[error("key {key}: finger {finger} is out of range 0-9")]
    FingerOutOfRange { key: KeyCode, finger: u8 },
    #[error("key {key}: finger {finger} does not belong to the {hand:?} hand")]
    HandMismatch {
        key: KeyCode,
        finger: u8,
        hand: crate::keyboard::Hand,
    },
    #[error("layout has no keys")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The configured custom layout could not be loaded
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}
