//! Integration tests for walking cases through the web form.

mod common;

use axum::http::StatusCode;
use casesim_core::settings::WalkSettings;

const THREE_DOORS: &str = "/cases/three_doors.json";
const ANSWER: &str = "/cases/three_doors.json/answer";

/// Display position of the button labelled `label`.
fn button_index(html: &str, label: &str) -> usize {
    let end = html
        .find(&format!("\">{label}</button>"))
        .unwrap_or_else(|| panic!("no button labelled {label}"));
    let start = html[..end].rfind("value=\"").unwrap() + "value=\"".len();
    html[start..end].parse().unwrap()
}

#[tokio::test]
async fn test_index_lists_every_case_file() {
    let app = common::build_test_app();

    let (status, html) = common::get_html(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("href=\"/cases/broken.json\""));
    assert!(html.contains("href=\"/cases/one_step.json\""));
    assert!(html.contains("href=\"/cases/three_doors.json\""));
}

#[tokio::test]
async fn test_index_links_encode_reserved_characters() {
    // Arrange
    let app = common::build_test_app();
    let (_, index) = common::get_html(app.clone(), "/").await;

    // Act
    let (status, html) = common::get_html(app, "/cases/night%20shift%20%232.json").await;

    // Assert
    assert!(index.contains("href=\"/cases/night%20shift%20%232.json\">night shift #2.json</a>"));
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Night Shift</h1>"));
    assert!(html.contains("action=\"/cases/night%20shift%20%232.json/answer\""));
}

#[tokio::test]
async fn test_index_with_missing_directory_shows_hint() {
    let app = common::build_test_app_with(
        common::fixtures_dir().join("does-not-exist"),
        WalkSettings::default(),
    );

    let (status, html) = common::get_html(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No case files found."));
}

#[tokio::test]
async fn test_case_page_presents_first_stage() {
    let app = common::build_test_app();

    let (status, html) = common::get_html(app, THREE_DOORS).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Three Doors</h1>"));
    assert!(html.contains("Pick the safe door three times."));
    assert!(html.contains("Stage 1 of 3"));
    assert!(html.contains("<p id=\"score\">Score: 0/3</p>"));
    assert!(html.contains("Which door do you open?"));
    assert!(html.contains("name=\"stage\" value=\"0\""));
    assert!(html.contains("value=\"0\">The green door</button>"));
    assert!(html.contains("value=\"1\">The red door</button>"));
    assert!(html.contains("value=\"2\">The black door</button>"));
}

#[tokio::test]
async fn test_wrong_answer_shows_hint_and_keeps_stage() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (own_status, own_html) = common::post_form(app.clone(), ANSWER, "stage=0&choice=1").await;
    let (shared_status, shared_html) = common::post_form(app, ANSWER, "stage=0&choice=2").await;

    // Assert
    assert_eq!(own_status, StatusCode::OK);
    assert!(own_html.contains("Wrong. Try again."));
    assert!(own_html.contains("Hint: Red means danger."));
    assert!(own_html.contains("Stage 1 of 3"));
    assert!(own_html.contains("Score: 0/3"));

    assert_eq!(shared_status, StatusCode::OK);
    assert!(shared_html.contains("Hint: Look for the safe colour."));
    assert!(shared_html.contains("Previous attempts for this stage:"));
    assert!(shared_html.contains("<li>The red door</li>"));
    assert!(shared_html.contains("<li>The black door</li>"));
}

#[tokio::test]
async fn test_full_walk_reaches_completion() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (_, first) = common::post_form(app.clone(), ANSWER, "stage=0&choice=0").await;
    common::post_form(app.clone(), ANSWER, "stage=1&choice=0").await;
    let (status, last) = common::post_form(app, ANSWER, "stage=2&choice=0").await;

    // Assert
    assert!(first.contains("Correct. Stage 1 solved in 1 attempt(s)."));
    assert!(first.contains("The green door leads to a stairwell."));
    assert!(first.contains("Stage 2 of 3"));
    assert!(first.contains("Score: 1/3"));

    assert_eq!(status, StatusCode::OK);
    assert!(last.contains("Correct. Stage 3 solved in 1 attempt(s)."));
    assert!(last.contains("<p class=\"success\" id=\"complete\">Simulation complete. Score: 3/3</p>"));
    assert!(last.contains("Stage 3: completed"));
    assert!(!last.contains("name=\"choice\""));
}

#[tokio::test]
async fn test_resubmitting_solved_stage_leaves_score_unchanged() {
    // Arrange
    let app = common::build_test_app();
    common::post_form(app.clone(), ANSWER, "stage=0&choice=0").await;

    // Act
    let (status, html) = common::post_form(app, ANSWER, "stage=0&choice=1").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Stage 1 was already solved; your score is unchanged."));
    assert!(html.contains("Stage 2 of 3"));
    assert!(html.contains("Score: 1/3"));
}

#[tokio::test]
async fn test_invalid_choice_reprompts_with_400() {
    let app = common::build_test_app();

    let (status, html) = common::post_form(app, ANSWER, "stage=0&choice=7").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("choice 7 is not valid; pick a number from 0 to 2"));
    assert!(html.contains("Stage 1 of 3"));
    assert!(html.contains("Score: 0/3"));
}

#[tokio::test]
async fn test_rejected_choice_drops_previous_verdict() {
    // Arrange
    let app = common::build_test_app();
    common::post_form(app.clone(), ANSWER, "stage=0&choice=0").await;

    // Act
    let (status, html) = common::post_form(app, ANSWER, "stage=1&choice=7").await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("choice 7 is not valid; pick a number from 0 to 2"));
    assert!(!html.contains("id=\"verdict\""));
    assert!(!html.contains("Correct. Stage 1 solved"));
    assert!(html.contains("Stage 2 of 3"));
    assert!(html.contains("Score: 1/3"));
}

#[tokio::test]
async fn test_answer_for_future_stage_reprompts_with_400() {
    let app = common::build_test_app();

    let (status, html) = common::post_form(app, ANSWER, "stage=2&choice=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("stage 2 is out of range"));
    assert!(html.contains("Stage 1 of 3"));
}

#[tokio::test]
async fn test_points_per_stage_scale_the_score() {
    let settings = WalkSettings {
        points_per_stage: 10,
        ..WalkSettings::default()
    };
    let app = common::build_test_app_with(common::fixtures_dir(), settings);

    let (_, html) = common::post_form(app, "/cases/one_step.json/answer", "stage=0&choice=1").await;

    assert!(html.contains("Simulation complete. Score: 10/10"));
}

#[tokio::test]
async fn test_shuffled_choices_are_judged_by_label() {
    // Arrange
    let settings = WalkSettings {
        shuffle_choices: true,
        ..WalkSettings::default()
    };
    let app = common::build_test_app_with(common::fixtures_dir(), settings);
    let (_, page) = common::get_html(app.clone(), THREE_DOORS).await;
    let green = button_index(&page, "The green door");

    // Act
    let (status, html) =
        common::post_form(app, ANSWER, &format!("stage=0&choice={green}")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Correct. Stage 1 solved in 1 attempt(s)."));
}

#[tokio::test]
async fn test_reset_starts_case_over() {
    // Arrange
    let app = common::build_test_app();
    common::post_form(app.clone(), ANSWER, "stage=0&choice=0").await;

    // Act
    let (status, html) = common::post_form(app.clone(), "/cases/three_doors.json/reset", "").await;
    let (_, reloaded) = common::get_html(app, THREE_DOORS).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Stage 1 of 3"));
    assert!(html.contains("Score: 0/3"));
    assert!(!html.contains("id=\"verdict\""));
    assert!(reloaded.contains("Stage 1 of 3"));
}

#[tokio::test]
async fn test_malformed_case_returns_422() {
    let app = common::build_test_app();

    let (status, html) = common::get_html(app, "/cases/broken.json").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("data-error=\"malformed_case\""));
    assert!(html.contains("stage 2"));
}

#[tokio::test]
async fn test_unknown_case_returns_404() {
    let app = common::build_test_app();

    let (status, html) = common::post_form(app, "/cases/missing.json/answer", "stage=0&choice=0").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("data-error=\"case_not_found\""));
}
