//! Devanagari keystroke composition
//!
//! Converts between the composed text a reader sees and the order in which
//! a Remington GAIL typist presses keys to produce it. All three entry
//! points are pure and operate on codepoint sequences; none of them fail.
//!
//! - [`decompose`]: composed passage to keystroke order
//! - [`recompose`]: keystroke order (or any prefix of it) to composed text
//! - [`compose_incremental`]: append one keystroke cluster to composed text

pub mod chars;
mod decompose;
mod incremental;
mod recompose;
pub mod rules;

pub use decompose::decompose;
pub use incremental::{compose_incremental, Composed};
pub use recompose::recompose;
