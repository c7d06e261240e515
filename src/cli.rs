use clap::{Parser, ValueEnum};
use std::ffi::OsString;

/// Time repeated runs of a command, one lap per run.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
pub struct Arguments {
    #[arg(short = 'v', long = None, env = "LAPWATCH_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Number of timed runs.
    #[arg(short, long, env = "LAPWATCH_LAPS", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub laps: u32,

    /// Untimed runs before measuring.
    #[arg(short, long, env = "LAPWATCH_WARMUP", default_value_t = 0)]
    pub warmup: u32,

    #[arg(short, long, env = "LAPWATCH_FORMAT", value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Keep timing when a run exits unsuccessfully.
    #[arg(short, long)]
    pub keep_going: bool,

    #[arg(required = true, last = true)]
    pub command: Vec<OsString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
