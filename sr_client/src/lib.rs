//! Internal modules for the sketch relay client.
//!
//! This library provides the HTTP implementation of the game authority API,
//! command parsing, text rendering, configuration and logging used by the
//! sr_client binary.

pub mod api_client;
pub mod cli_app;
pub mod commands;
pub mod config;
pub mod display;
pub mod logging;
