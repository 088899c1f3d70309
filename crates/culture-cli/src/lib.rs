//! Culture CLI library.
//!
//! Argument parsing, route resolution and text rendering for the `culture`
//! binary. The binary itself only sets up logging and the runtime.

pub mod cli;
pub mod commands;
pub mod render;
pub mod route;
