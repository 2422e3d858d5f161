//! Route handlers
//!
//! `GET /` renders the form from both registries; `POST /post` runs the
//! apply + persist pipeline for whichever option sets the submission names,
//! then redirects on clean success. Field-level problems come back as a 400
//! listing the skipped keys; a document read or write failure is a 500 and
//! never masquerades as a successful redirect.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{error, info};

use super::{forms, render};
use crate::options::{apply_submission, merge_options};
use crate::registry::OptionSet;
use crate::server::AppState;

/// Query parameters for the options page
#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    /// Set by the post-save redirect to show the success flash
    saved: Option<String>,
}

/// `GET /` — render the options form
pub(crate) async fn options_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let extension = state.set(OptionSet::Extension).lock().await.registry.clone();
    let theme = state.set(OptionSet::Theme).lock().await.registry.clone();
    Html(render::options_page(
        &extension,
        &theme,
        query.saved.is_some(),
    ))
}

/// `POST /post` — save posted option values
pub(crate) async fn save_options(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let mut split = forms::split_submission(&pairs);
    let mut warnings: Vec<String> = split
        .malformed
        .iter()
        .map(|key| format!("Malformed field name: {}", key))
        .collect();

    for set in [OptionSet::Extension, OptionSet::Theme] {
        let Some(submission) = split.take(set) else {
            continue;
        };

        let mut guard = state.set(set).lock().await;
        let snapshot = guard.registry.clone();
        let outcome = apply_submission(&mut guard.registry, &submission);

        // a branch that applied nothing must not rewrite its file
        if outcome.applied > 0 {
            if let Err(e) = merge_options(&guard.options_path, guard.registry.flat_values()) {
                error!(set = %set, error = %e, "Option save aborted");
                // the file kept its old contents, so the registry does too
                guard.registry = snapshot;
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::error_page(&e.to_string())),
                )
                    .into_response();
            }
            info!(set = %set, applied = outcome.applied, "Options saved");
        }

        warnings.extend(outcome.warnings.iter().map(ToString::to_string));
    }

    if warnings.is_empty() {
        (
            StatusCode::FOUND,
            [(header::LOCATION, "/?saved=1")],
        )
            .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Html(render::rejected_page(&warnings)),
        )
            .into_response()
    }
}
