//! Laneshift - three-lane endless runner for the terminal.
//!
//! The simulation (`spawner`, `run`, `session`) is independent of the
//! terminal; `input` and `ui` adapt it to crossterm and ratatui, and
//! `simulator` plays it headless for balance checks.

pub mod build_info;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod input;
pub mod logging;
pub mod run;
pub mod session;
pub mod simulator;
pub mod spawner;
pub mod ui;
