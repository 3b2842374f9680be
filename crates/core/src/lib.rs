//! `stockwatch-core` — shared building blocks.
//!
//! This crate contains **pure** primitives (no HTTP, no IO) used by the
//! inventory pipeline and the dashboard server.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::SessionId;
