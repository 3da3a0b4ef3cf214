//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod cases;
pub mod health;

/// The full application router, without middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(cases::router())
}
