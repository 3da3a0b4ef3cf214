//! Case Simulator: Case Content context.
//!
//! Responsible for parsing case documents, validating them into immutable
//! `Case` values, and listing the case files available to a front-end.

pub mod application;
pub mod domain;
