use std::path::PathBuf;

use clap::Parser;
use lapwatch_core::TICK_PERIOD_MS;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Log verbosity; repeat for more (error, warn, info, debug, trace).
    #[arg(short = 'v', long = None, env = "LAPWATCH_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Write logs here instead of stderr, which the stopwatch screen covers.
    #[arg(long, env = "LAPWATCH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Display refresh period while running.
    #[arg(
        long,
        env = "LAPWATCH_TICK_MS",
        default_value_t = TICK_PERIOD_MS,
        value_parser = clap::value_parser!(u64).range(10..=1000)
    )]
    pub tick_ms: u64,
}

impl Arguments {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
