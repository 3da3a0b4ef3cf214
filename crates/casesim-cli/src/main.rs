//! Case simulator terminal entry point.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use casesim_case::application::loader;
use casesim_cli::config::CliConfig;
use casesim_cli::console;
use casesim_cli::error::CliError;
use casesim_core::clock::SystemClock;
use casesim_core::rng::StdRngSource;
use casesim_core::settings::WalkSettings;
use casesim_session::application::walker::CaseWalker;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr; stdout belongs to the trainee.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let settings = WalkSettings::from_env(false)?;
    let config = CliConfig::from_args(std::env::args().skip(1), settings)?;

    let case = loader::load_case(&config.case_path)?;

    let mut rng = StdRngSource::from_seed_option(config.settings.seed);
    let clock = SystemClock;
    let mut walker = CaseWalker::start(Arc::new(case), &config.settings, &mut rng);

    let stdin = io::stdin();
    let stdout = io::stdout();
    console::run(&mut walker, stdin.lock(), stdout.lock(), &mut rng, &clock)?;

    Ok(())
}
