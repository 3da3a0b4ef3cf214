//! Case simulator web form: library surface shared by the binary and the
//! integration tests.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
