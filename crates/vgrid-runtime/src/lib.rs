#![forbid(unsafe_code)]

//! Elm-style runtime for vgrid applications.
//!
//! The program runtime manages the update/view loop: it owns the terminal
//! session, converts backend events, routes mouse events with hit-test
//! results from the last rendered frame, and presents frames as diffs.

pub mod presenter;
pub mod program;
pub mod session;

pub use program::{Cmd, Model, Program, ProgramConfig};
