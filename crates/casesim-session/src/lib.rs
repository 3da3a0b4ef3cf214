//! Case Simulator: Session & Progress context.
//!
//! Responsible for walking a trainee through a case: presenting the current
//! stage, judging submitted choices, keeping the score, and allowing retries
//! until each stage is solved.

pub mod application;
pub mod domain;
