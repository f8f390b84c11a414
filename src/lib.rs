pub mod cli;
pub mod config;
pub mod crud;
pub mod data;
pub mod export;
pub mod shell;
pub mod table_display;
pub mod utils;
pub mod view;
