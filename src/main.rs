use anyhow::{Context, Result};
use std::process;
use test_tag_publish::cli::output::{format_error, format_execution_event, format_release_success};
use test_tag_publish::cli::{log_filter, parse_exit_code, Cli};
use test_tag_publish::core::{ReleaseConfig, RunState, StepKind};
use test_tag_publish::execution::ReleaseEngine;
use test_tag_publish::runner::SubprocessRunner;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            let code = parse_exit_code(&err);
            // print() writes help/version to stdout and errors to stderr
            let _ = err.print();
            process::exit(code);
        }
    };

    // Initialize logging
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose, &directives))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let project_dir = std::env::current_dir().context("Failed to read the working directory")?;

    let config = match ReleaseConfig::resolve(cli.options(), &project_dir) {
        Ok(config) => config,
        Err(err) => {
            println!("{}", format_error(&err.to_string()));
            process::exit(test_tag_publish::core::error::EXIT_FAILURE);
        }
    };
    debug!("Release config: {:?}", config);

    let mut engine = ReleaseEngine::new(SubprocessRunner::new());
    engine.add_event_handler(|event| {
        if let Some(line) = format_execution_event(event) {
            println!("{}", line);
        }
    });

    let mut state = RunState::new(&config.old_version, &StepKind::ALL);
    match engine.execute(&config, &mut state).await {
        Ok(()) => {
            let new_version = state.new_version.as_deref().unwrap_or_default();
            println!("{}", format_release_success(new_version, state.duration()));
            Ok(())
        }
        Err(err) => {
            println!("{}", format_error(&err.to_string()));
            process::exit(err.exit_code());
        }
    }
}
