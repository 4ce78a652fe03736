pub mod api;
pub mod cli;
pub mod config;
pub mod listing;
pub mod models;
pub mod refresh;
pub mod tui;
