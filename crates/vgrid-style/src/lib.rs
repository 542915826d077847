#![forbid(unsafe_code)]

//! Style types for terminal UI styling.

pub mod color;
pub mod style;

pub use color::{Ansi16, Color};
pub use style::{Style, StyleFlags};
