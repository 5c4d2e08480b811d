//! Command-line interface

pub mod output;

use crate::core::{error::EXIT_FAILURE, ReleaseOptions};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
<VERSION> is passed to `npm version`: an explicit version such as 1.2.3, or
one of patch, minor, major, prepatch, preminor, premajor, prerelease.

In message templates every %s is replaced with the new version.";

/// Test, tag and publish an npm package
#[derive(Debug, Parser, Clone)]
#[command(name = "test-tag-publish")]
#[command(version)]
#[command(about = "Test, commit, tag, push and publish a new npm package version", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Version specifier forwarded to `npm version`
    #[arg(value_name = "VERSION")]
    pub specifier: Option<String>,

    /// Commit message template
    #[arg(short, long, value_name = "TEMPLATE", default_value = "v%s")]
    pub message: String,

    /// Tag message template [default: the commit message template]
    #[arg(short, long, value_name = "TEMPLATE")]
    pub tag: Option<String>,

    /// Skip the uncommitted changes check
    #[arg(short, long)]
    pub force: bool,

    /// Skip running the tests
    #[arg(short = 'n', long = "no-test")]
    pub no_test: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// Options for configuration resolution
    pub fn options(&self) -> ReleaseOptions {
        ReleaseOptions {
            specifier: self.specifier.clone(),
            message: Some(self.message.clone()),
            tag: self.tag.clone(),
            force: self.force,
            no_test: self.no_test,
        }
    }
}

/// Exit status for an argument parse result that did not yield a `Cli`.
///
/// Help and version requests are successful runs; every other parse error
/// is a configuration failure.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => EXIT_FAILURE,
    }
}

/// Log filter: `DEBUG` with `--verbose`, otherwise `WARN`. Any `RUST_LOG`
/// style `directives` replace that default.
pub fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let default = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives)
}
