//! Application layer for the Case Content context.

pub mod library;
pub mod loader;
