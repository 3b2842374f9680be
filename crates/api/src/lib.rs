//! HTTP dashboard: server wiring, sessions, and HTML/JSON presentation.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
