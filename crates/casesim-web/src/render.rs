//! HTML rendering for the web form.
//!
//! Pages are small enough to build with `format!`. Every piece of case text
//! goes through `escape` or `markdown` before it reaches the page.

use axum::http::StatusCode;
use casesim_case::application::library::CaseEntry;
use casesim_core::error::CaseError;
use casesim_session::domain::outcome::{CompletedStage, StageView, SubmitOutcome, Verdict};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pulldown_cmark::{Event, Parser, html};

use crate::state::CaseRun;

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem;line-height:1.5}\
.success{background:#e6f4ea;padding:.75rem;border-radius:4px}\
.info{background:#e8f0fe;padding:.75rem;border-radius:4px}\
.error{background:#fce8e6;padding:.75rem;border-radius:4px}\
.choices button{display:block;width:100%;margin:.4rem 0;padding:.6rem;text-align:left}\
details{margin:.5rem 0}";

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes a case file name for use as one URL path segment.
/// The output is plain ASCII and safe inside HTML attributes.
#[must_use]
pub fn path_segment(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

/// Renders Markdown to HTML. Raw HTML in the source is shown as text.
#[must_use]
pub fn markdown(text: &str) -> String {
    let parser = Parser::new(text).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Police Case Simulator</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// The case picker.
#[must_use]
pub fn index_page(entries: &[CaseEntry]) -> String {
    let mut body = String::from("<h1>Police Case Simulator</h1>\n");
    if entries.is_empty() {
        body.push_str(
            "<p class=\"error\">No case files found. Put one or more JSON case files into \
             the cases folder and reload.</p>\n\
             <p class=\"info\">Files must have keys: id, title, summary, stages (list).</p>\n",
        );
    } else {
        body.push_str("<h2>Choose a case</h2>\n<ul>\n");
        for entry in entries {
            body.push_str(&format!(
                "<li><a href=\"/cases/{}\">{}</a></li>\n",
                path_segment(&entry.name),
                escape(&entry.name)
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Cases", &body)
}

/// The page for one case: last verdict, solved stages, and either the
/// current stage form or the completion banner.
#[must_use]
pub fn case_page(name: &str, run: &CaseRun, notice: Option<&CaseError>) -> String {
    let walker = &run.walker;
    let case = walker.case();
    let name = path_segment(name);
    let mut body = format!("<h1>{}</h1>\n", escape(case.title()));
    if !case.summary().is_empty() {
        body.push_str(&markdown(case.summary()));
    }
    body.push_str(&format!(
        "<p><a href=\"/\">All cases</a></p>\n\
         <form method=\"post\" action=\"/cases/{name}/reset\">\
         <button type=\"submit\">Restart case</button></form>\n"
    ));

    if let Some(outcome) = &run.last_outcome {
        body.push_str(&outcome_section(outcome));
    }
    if let Some(err) = notice {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(&err.to_string())));
    }

    let summary = walker.summary();
    if !summary.completed_stages.is_empty() {
        body.push_str("<h2>Completed stages (correct answers)</h2>\n");
        for stage in &summary.completed_stages {
            body.push_str(&completed_stage_section(stage));
        }
    }

    match walker.present() {
        Ok(view) => body.push_str(&stage_form(&name, &view)),
        Err(_) => body.push_str(&format!(
            "<p class=\"success\" id=\"complete\">Simulation complete. Score: {}/{}</p>\n",
            summary.score, summary.max_score
        )),
    }

    layout(case.title(), &body)
}

fn outcome_section(outcome: &SubmitOutcome) -> String {
    let number = outcome.stage_index + 1;
    match outcome.verdict {
        Verdict::Correct => {
            let mut html = format!(
                "<div class=\"success\" id=\"verdict\"><p>Correct. Stage {number} solved in {} attempt(s).</p>\n",
                outcome.attempts
            );
            if let Some(next_info) = &outcome.next_info {
                html.push_str(&format!(
                    "<p><strong>Next info:</strong></p>\n{}",
                    markdown(next_info)
                ));
            }
            html.push_str("</div>\n");
            html
        }
        Verdict::Incorrect => {
            let mut html =
                String::from("<div class=\"error\" id=\"verdict\"><p>Wrong. Try again.</p>\n");
            if let Some(feedback) = &outcome.feedback {
                html.push_str(&format!("<p class=\"info\">Hint: {}</p>\n", escape(feedback)));
            }
            html.push_str("</div>\n");
            html
        }
        Verdict::AlreadySolved => format!(
            "<div class=\"info\" id=\"verdict\"><p>Stage {number} was already solved; \
             your score is unchanged.</p></div>\n"
        ),
    }
}

fn completed_stage_section(stage: &CompletedStage) -> String {
    let mut html = format!(
        "<details><summary>Stage {}: completed</summary>\n\
         <p><strong>Given info:</strong></p>\n{}\
         <p><strong>Final (correct) action:</strong> {}</p>\n\
         <p>Attempts made before success: {}</p>\n",
        stage.stage_index + 1,
        markdown(&stage.info),
        escape(&stage.correct_label),
        stage.attempts
    );
    if let Some(next_info) = &stage.next_info {
        html.push_str(&format!(
            "<p><strong>Next info revealed:</strong> {}</p>\n",
            escape(next_info)
        ));
    }
    html.push_str("</details>\n");
    html
}

fn stage_form(name: &str, view: &StageView) -> String {
    let mut html = format!(
        "<h2>Stage {} of {}</h2>\n<p id=\"score\">Score: {}/{}</p>\n{}",
        view.stage_number(),
        view.stage_count,
        view.score,
        view.max_score,
        markdown(&view.info)
    );
    if !view.question.is_empty() {
        html.push_str(&format!(
            "<p><strong>Question:</strong> {}</p>\n",
            escape(&view.question)
        ));
    }
    if !view.previous_attempts.is_empty() {
        html.push_str("<p>Previous attempts for this stage:</p>\n<ol>\n");
        for label in &view.previous_attempts {
            html.push_str(&format!("<li>{}</li>\n", escape(label)));
        }
        html.push_str("</ol>\n");
    }
    html.push_str(&format!(
        "<form class=\"choices\" method=\"post\" action=\"/cases/{name}/answer\">\n\
         <input type=\"hidden\" name=\"stage\" value=\"{}\">\n",
        view.stage_index
    ));
    for (i, label) in view.choices.iter().enumerate() {
        html.push_str(&format!(
            "<button type=\"submit\" name=\"choice\" value=\"{i}\">{}</button>\n",
            escape(label)
        ));
    }
    html.push_str("</form>\n");
    html
}

/// A standalone error page.
#[must_use]
pub fn error_page(status: StatusCode, error_code: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"error\" data-error=\"{}\">{}</p>\n<p><a href=\"/\">Back to cases</a></p>\n",
        status.as_u16(),
        escape(error_code),
        escape(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_path_segment_encodes_reserved_characters() {
        assert_eq!(path_segment("case_demo_001.json"), "case_demo_001.json");
        assert_eq!(path_segment("night shift #2?.json"), "night%20shift%20%232%3F.json");
    }

    #[test]
    fn test_markdown_renders_emphasis_and_neutralises_html() {
        let html = markdown("The door is **forced**. <script>alert(1)</script>");

        assert!(html.contains("<strong>forced</strong>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_index_page_without_cases_explains_layout() {
        let page = index_page(&[]);

        assert!(page.contains("No case files found."));
    }

    #[test]
    fn test_error_page_carries_code_and_message() {
        let page = error_page(StatusCode::NOT_FOUND, "case_not_found", "case not found: <x>");

        assert!(page.contains("<h1>404</h1>"));
        assert!(page.contains("data-error=\"case_not_found\""));
        assert!(page.contains("case not found: &lt;x&gt;"));
    }
}
