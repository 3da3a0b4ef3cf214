//! Terminal front-end for the case simulator.
//!
//! Exposes the run loop and its configuration as a library so the loop can
//! be driven by in-memory input in tests.

pub mod config;
pub mod console;
pub mod error;
