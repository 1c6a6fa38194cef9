//! `thermdiv` library crate.
//!
//! The binary (`thermdiv`) is a thin wrapper around this library so that:
//!
//! - the models and searches are testable without spawning processes
//! - the pure search functions can be driven from other tools with explicit configs

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod models;
pub mod plot;
pub mod report;
pub mod search;
