//! HTTP surface
//!
//! Two routes on the hosting listener: `GET /` renders the options form,
//! `POST /post` accepts the submission and redirects back on success.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::server::AppState;

mod forms;
mod handlers;
mod render;

pub use forms::{parse_bracket_key, split_submission, SplitSubmission};

/// Build the router over the shared application state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::options_page))
        .route("/post", post(handlers::save_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
