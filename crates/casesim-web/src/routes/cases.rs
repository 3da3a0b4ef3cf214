//! Routes for walking a case through the web form.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use casesim_core::error::CaseError;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

/// Form body for POST /cases/{name}/answer.
#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    /// Stage the form was rendered for.
    pub stage: usize,
    /// Display position of the clicked choice.
    pub choice: usize,
}

type PageResult = Result<(StatusCode, Html<String>), ApiError>;

/// GET /
#[instrument(skip(state))]
async fn index(State(state): State<AppState>) -> PageResult {
    let entries = state.library.list()?;
    Ok((StatusCode::OK, Html(render::index_page(&entries))))
}

/// GET /cases/{name}
#[instrument(skip(state))]
async fn show_case(State(state): State<AppState>, Path(name): Path<String>) -> PageResult {
    let mut runs = state.runs()?;
    if !runs.contains_key(&name) {
        let run = state.start_run(&name)?;
        runs.insert(name.clone(), run);
    }
    let run = runs
        .get(&name)
        .ok_or_else(|| CaseError::CaseNotFound(name.clone()))?;
    Ok((StatusCode::OK, Html(render::case_page(&name, run, None))))
}

/// POST /cases/{name}/answer
#[instrument(skip(state, form), fields(stage = form.stage, choice = form.choice))]
async fn answer(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<AnswerForm>,
) -> PageResult {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, case = %name, "handling answer submission");

    let mut runs = state.runs()?;
    if !runs.contains_key(&name) {
        let run = state.start_run(&name)?;
        runs.insert(name.clone(), run);
    }
    let run = runs
        .get_mut(&name)
        .ok_or_else(|| CaseError::CaseNotFound(name.clone()))?;

    let result = {
        let mut rng = state.rng()?;
        run.walker
            .submit_at(form.stage, form.choice, &mut *rng, state.clock.as_ref())
    };

    match result {
        Ok(outcome) => {
            info!(
                %correlation_id,
                verdict = ?outcome.verdict,
                score = outcome.score,
                "answer judged"
            );
            run.last_outcome = Some(outcome);
            Ok((StatusCode::OK, Html(render::case_page(&name, run, None))))
        }
        Err(e) if e.is_reprompt() => {
            warn!(%correlation_id, error = %e, "answer rejected");
            run.last_outcome = None;
            Ok((
                StatusCode::BAD_REQUEST,
                Html(render::case_page(&name, run, Some(&e))),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /cases/{name}/reset
///
/// Reloads the case file so edits made since the walk started take effect.
#[instrument(skip(state))]
async fn reset_case(State(state): State<AppState>, Path(name): Path<String>) -> PageResult {
    let run = state.start_run(&name)?;
    let mut runs = state.runs()?;
    let run = runs.entry(name.clone()).insert_entry(run).into_mut();
    info!(case = %name, "case restarted");
    Ok((StatusCode::OK, Html(render::case_page(&name, run, None))))
}

/// Returns the router for case pages.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/cases/{name}", get(show_case))
        .route("/cases/{name}/answer", post(answer))
        .route("/cases/{name}/reset", post(reset_case))
}

#[cfg(test)]
mod tests {
    use std::path::Path as FsPath;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::Request;
    use casesim_case::application::library::CaseLibrary;
    use casesim_core::clock::Clock;
    use casesim_core::rng::DeterministicRng;
    use casesim_core::settings::WalkSettings;
    use casesim_test_support::{FixedClock, MockRng};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn test_app_state(dir: &str) -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::standard());
        let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(MockRng));
        AppState::new(
            CaseLibrary::new(FsPath::new(env!("CARGO_MANIFEST_DIR")).join(dir)),
            WalkSettings::default(),
            clock,
            rng,
        )
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_fixture_cases() {
        // Arrange
        let app = router().with_state(test_app_state("tests/fixtures/cases"));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("href=\"/cases/three_doors.json\""));
        assert!(html.contains("href=\"/cases/broken.json\""));
    }

    #[tokio::test]
    async fn test_answer_returns_422_for_missing_fields() {
        // Arrange
        let app = router().with_state(test_app_state("tests/fixtures/cases"));
        let request = Request::builder()
            .method("POST")
            .uri("/cases/three_doors.json/answer")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("stage=0"))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert: axum rejects undeserializable forms with 422.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_show_unknown_case_returns_404_page() {
        let app = router().with_state(test_app_state("tests/fixtures/cases"));
        let request = Request::builder()
            .uri("/cases/nope.json")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("data-error=\"case_not_found\""));
    }
}
