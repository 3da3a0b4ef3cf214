//! Application layer for the Session & Progress context.

pub mod walker;
