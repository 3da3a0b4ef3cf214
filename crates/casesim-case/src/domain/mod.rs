//! Domain layer for the Case Content context.

pub mod case;
pub mod document;
