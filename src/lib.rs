//! # Duskr Library
//!
//! Internal library for the duskr binary application.
//!
//! This library exists to enable testing of the state machine and ramp
//! engine and to provide clean separation between CLI dispatch (main.rs)
//! and application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Duskr` struct coordinates a daemon run
//! - **Core Logic**: `core` holds the day/night state machine and loop
//! - **Transitions**: `transition` computes and paces stepped ramps
//! - **Collaborators**: `daylight` resolves the sunrise/sunset window,
//!   `sink` drives the external temperature command
//! - **Configuration**: `config` merges the TOML file with CLI flags
//! - **Commands**: `commands` holds the one-shot enable/disable paths
//! - **Infrastructure**: `logger` macros, `error` taxonomy, `constants`

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod daylight;
pub mod error;
pub mod sink;
pub mod transition;

mod duskr;

// Re-export for binary
pub use duskr::Duskr;
