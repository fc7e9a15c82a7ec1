use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod producer;
pub mod service;
pub mod state;
pub mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(bookings::routes())
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
