//! Interstellar CLI library.
//!
//! This crate provides the subcommand handlers, output formatting, and
//! terminal styling behind the `interstellar-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
