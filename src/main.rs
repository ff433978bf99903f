//! `linecp SOURCE DEST`: copy SOURCE to DEST, creating or truncating DEST.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use linecp::CopyError;
use std::{ffi::OsString, path::Path, process::ExitCode};

/// Copy a file to another, one bounded line chunk at a time
///
/// Arguments are never options, so names starting with "-" are files.
/// Write "./-" for a file called "-".
#[derive(Parser, Debug)]
#[command(name = "linecp", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// File to copy from, or "-" for standard input
    #[arg(allow_hyphen_values = true)]
    source: OsString,

    /// File to copy to, created or truncated; "-" for standard output
    #[arg(allow_hyphen_values = true)]
    dest: OsString,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage(err),
    };
    log::debug!("{:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("linecp: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    linecp::copy(&cli.source, &cli.dest).with_context(|| {
        format!(
            "failed to copy {} to {}",
            Path::new(&cli.source).display(),
            Path::new(&cli.dest).display()
        )
    })?;
    Ok(())
}

/// Report a command line that isn't exactly a source and a destination,
/// on stderr with exit code 1.
fn usage(err: clap::Error) -> ExitCode {
    let reason = err
        .kind()
        .as_str()
        .unwrap_or("expected a source and a destination");
    eprintln!("{}", CopyError::Usage(reason.to_owned()));
    eprintln!();
    eprintln!("{}", Cli::command().render_long_help());
    ExitCode::FAILURE
}
