//! Domain layer for the Session & Progress context.

pub mod outcome;
pub mod session;
