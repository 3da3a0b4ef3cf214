//! Case Simulator Core: shared abstractions.
//!
//! This crate defines the error type, the clock and randomness seams, and the
//! walk settings that the case, session and front-end crates depend on. It
//! contains no I/O.

pub mod clock;
pub mod error;
pub mod rng;
pub mod settings;
