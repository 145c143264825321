pub mod api;
pub mod config;
pub mod grid;
pub mod session;
pub mod ui;
