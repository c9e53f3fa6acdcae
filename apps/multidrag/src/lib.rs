//! # multidrag
//!
//! Command-line host for the multidrag-core board engine.
//!
//! - [`cli`] - argument parsing and command implementations
//! - [`config`] - TOML configuration
//! - [`script`] - replay of recorded host events

pub mod cli;
pub mod config;
pub mod script;
