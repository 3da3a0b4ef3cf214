//! Shared test helpers for web integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use casesim_case::application::library::CaseLibrary;
use casesim_core::clock::Clock;
use casesim_core::rng::DeterministicRng;
use casesim_core::settings::WalkSettings;
use casesim_test_support::{FixedClock, MockRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

use casesim_web::routes;
use casesim_web::state::AppState;

/// Directory holding the fixture case files.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cases")
}

/// Build the full app router over the fixture cases with a fixed clock and
/// shuffling off. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with(fixtures_dir(), WalkSettings::default())
}

/// Build the app over `dir` with custom walk settings.
pub fn build_test_app_with(dir: PathBuf, settings: WalkSettings) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::standard());
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(MockRng));
    let app_state = AppState::new(CaseLibrary::new(dir), settings, clock, rng);

    routes::router().with_state(app_state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Send a GET request and return the status and HTML body.
pub async fn get_html(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a url-encoded form body.
pub async fn post_form(app: Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and parse the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_html(app, uri).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    (status, json)
}
