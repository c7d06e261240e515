mod cli;

use crate::cli::{Arguments, Format};
use anyhow::{anyhow, Context};
use clap::Parser;
use lapwatch::Stopwatch;
use std::io;
use std::process::{Command, Stdio};
use tracing_log::LogTracer;

fn main() {
    let arguments = Arguments::parse();
    if let Err(e) = set_log_level(&arguments) {
        eprintln!("Failed to configure logging: {e}");
    }

    tracing::debug!(?arguments, "starting lapwatch");

    if let Err(e) = run(&arguments) {
        tracing::error!(%e, "Unable to time the command");
        std::process::exit(1);
    }
}

fn set_log_level(arguments: &Arguments) -> anyhow::Result<()> {
    LogTracer::init()?;

    let level = match arguments.verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn run(arguments: &Arguments) -> anyhow::Result<()> {
    let (program, args) = arguments
        .command
        .split_first()
        .ok_or_else(|| anyhow!("No command to time"))?;

    for round in 0..arguments.warmup {
        tracing::debug!(round, "Warmup run");
        execute(program, args, arguments.keep_going)?;
    }

    let mut stopwatch = Stopwatch::new();
    stopwatch.start()?;

    for round in 0..arguments.laps {
        // Keep logging overhead out of the lap.
        stopwatch.reset_lap()?;
        execute(program, args, arguments.keep_going)?;
        let lap = stopwatch.lap()?;

        tracing::info!(round, ?lap, "Timed run");
    }

    stopwatch.stop()?;

    let summary = stopwatch.summary();
    match arguments.format {
        Format::Text => println!("{summary}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn execute(
    program: &std::ffi::OsStr,
    args: &[std::ffi::OsString],
    keep_going: bool,
) -> anyhow::Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .with_context(|| format!("Failed to run {program:?}"))?;

    if !status.success() {
        if keep_going {
            tracing::warn!(%status, "Command exited unsuccessfully");
        } else {
            return Err(anyhow!("{program:?} exited with {status}"));
        }
    }

    Ok(())
}
