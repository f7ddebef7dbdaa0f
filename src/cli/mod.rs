//! CLI module for the timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Argument definitions using clap derive
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;

pub use commands::Cli;
pub use display::Display;
