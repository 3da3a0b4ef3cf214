//! Shared test doubles and case fixtures for the case simulator.

pub mod cases;
mod clock;
mod rng;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
