//! occurrence-counted `-v`/`-q` flags mapped onto a tracing level filter

use tracing::{level_filters::LevelFilter, Level};

#[derive(clap::Args, Debug, Clone)]
pub struct Verbosity {
    /// More output per occurrence
    #[clap(long, short = 'v', parse(from_occurrences), global = true)]
    verbose: i8,

    /// Less output per occurrence
    #[clap(
        long,
        short = 'q',
        parse(from_occurrences),
        global = true,
        conflicts_with = "verbose"
    )]
    quiet: i8,
}

impl Verbosity {
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbosity() {
            i8::MIN..=-1 => None,
            0 => Some(Level::ERROR),
            1 => Some(Level::WARN),
            2 => Some(Level::INFO),
            3 => Some(Level::DEBUG),
            4..=i8::MAX => Some(Level::TRACE),
        }
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
    }

    // INFO by default, so generation progress shows without any flags.
    fn verbosity(&self) -> i8 {
        2 - self.quiet + self.verbose
    }
}
