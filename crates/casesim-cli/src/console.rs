//! The terminal run loop.
//!
//! Prints the current stage, reads one line per attempt, and reports the
//! verdict. Unparseable or out-of-range input re-prompts; `q`, `quit`,
//! `exit` or end of input stop the run early.

use std::io::{BufRead, Write};

use casesim_core::clock::Clock;
use casesim_core::rng::DeterministicRng;
use casesim_session::application::walker::{CaseWalker, RunSummary};
use casesim_session::domain::outcome::{StageView, SubmitOutcome, Verdict};
use tracing::{debug, warn};

use crate::error::CliError;

/// How a terminal run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Final score and solved stages.
    pub summary: RunSummary,
    /// True if the trainee quit before the last stage was solved.
    pub quit: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Choice(usize),
    Unrecognized(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Input::Quit,
        other => other
            .parse::<usize>()
            .map_or_else(|_| Input::Unrecognized(trimmed.to_owned()), Input::Choice),
    }
}

/// Runs the walk to completion or until the trainee quits.
///
/// # Errors
///
/// Returns `CliError::Io` if reading input or writing output fails.
pub fn run<R, W>(
    walker: &mut CaseWalker,
    mut input: R,
    mut out: W,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> Result<RunReport, CliError>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "CASE SIMULATION: {}", walker.case().title())?;
    if !walker.case().summary().is_empty() {
        writeln!(out, "{}", walker.case().summary())?;
    }

    let mut quit = false;
    let mut show_stage = true;
    while !walker.is_complete() {
        let view = walker.present()?;
        if show_stage {
            write_stage(&mut out, &view)?;
        }

        write!(out, "Enter option number (q to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            debug!("input closed");
            quit = true;
            break;
        }

        show_stage = false;
        match parse_input(&line) {
            Input::Quit => {
                quit = true;
                break;
            }
            Input::Unrecognized(raw) => {
                writeln!(
                    out,
                    "'{raw}' is not an option number. Enter 0 to {}, or q to quit.",
                    view.choices.len().saturating_sub(1)
                )?;
            }
            Input::Choice(choice) => match walker.submit(choice, rng, clock) {
                Ok(outcome) => {
                    show_stage = outcome.verdict == Verdict::Correct;
                    write_outcome(&mut out, &outcome)?;
                }
                Err(e) if e.is_reprompt() => {
                    warn!(choice, error = %e, "rejected choice");
                    writeln!(out, "{e}")?;
                }
                Err(e) => return Err(e.into()),
            },
        }
    }

    let summary = walker.summary();
    writeln!(out)?;
    if quit {
        writeln!(
            out,
            "Simulation stopped after {} of {} stages. Score: {}/{}",
            summary.completed_stages.len(),
            summary.stage_count,
            summary.score,
            summary.max_score
        )?;
    } else {
        writeln!(
            out,
            "Simulation ended. Score: {}/{}",
            summary.score, summary.max_score
        )?;
    }
    out.flush()?;

    Ok(RunReport { summary, quit })
}

fn write_stage<W: Write>(out: &mut W, view: &StageView) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "--- Stage {} of {} | Score: {}/{}",
        view.stage_number(),
        view.stage_count,
        view.score,
        view.max_score
    )?;
    if !view.info.is_empty() {
        writeln!(out, "{}", view.info)?;
    }
    if !view.question.is_empty() {
        writeln!(out)?;
        writeln!(out, "Question: {}", view.question)?;
    }
    for (i, label) in view.choices.iter().enumerate() {
        writeln!(out, "  {i}) {label}")?;
    }
    Ok(())
}

fn write_outcome<W: Write>(out: &mut W, outcome: &SubmitOutcome) -> std::io::Result<()> {
    match outcome.verdict {
        Verdict::Correct => {
            writeln!(out, "Correct. Proceeding...")?;
            if let Some(next_info) = &outcome.next_info {
                writeln!(out, "Next: {next_info}")?;
            }
        }
        Verdict::Incorrect => {
            match &outcome.feedback {
                Some(feedback) => writeln!(out, "Wrong. Feedback: {feedback}")?,
                None => writeln!(out, "Wrong.")?,
            }
            writeln!(out, "Try again.")?;
        }
        Verdict::AlreadySolved => {}
    }
    Ok(())
}
