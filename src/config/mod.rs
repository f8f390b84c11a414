//! Configuration module
//!
//! Display markers, table defaults and export settings loaded from
//! `config.toml`.

pub mod config;
