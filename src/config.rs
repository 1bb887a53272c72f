use crate::error::ShellError;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use argh::FromArgs;
use std::path::PathBuf;
use tracing::Level;

/// Largest history arena accepted on the command line.
pub const MAX_HISTORY_CAPACITY: usize = 64 * 1024;

#[derive(FromArgs, Debug, PartialEq)]
/// Interactive line-editing command shell with history and completion.
pub struct Args {
    /// size of the history ring in bytes (default 512).
    #[argh(option, default = "DEFAULT_HISTORY_CAPACITY")]
    pub history_capacity: usize,

    /// initial value shown and changed by the `log` command (default 1).
    #[argh(option, default = "1")]
    pub log_level: u32,

    /// append tracing output to this file; nothing is logged without it.
    #[argh(option)]
    pub log_file: Option<PathBuf>,

    /// tracing verbosity: error, warn, info, debug or trace (default info).
    #[argh(option, default = "Level::INFO")]
    pub trace_level: Level,

    /// read the terminal in its normal line mode instead of raw mode.
    #[argh(switch)]
    pub no_raw: bool,
}

/// Validated settings the shell is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub history_capacity: usize,
    pub log_level: u32,
    pub log_file: Option<PathBuf>,
    pub trace_level: Level,
    pub raw_mode: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_level: 1,
            log_file: None,
            trace_level: Level::INFO,
            raw_mode: true,
        }
    }
}

impl TryFrom<Args> for ShellConfig {
    type Error = ShellError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if !(2..=MAX_HISTORY_CAPACITY).contains(&args.history_capacity) {
            return Err(ShellError::InvalidConfig(format!(
                "--history-capacity must be between 2 and {MAX_HISTORY_CAPACITY}, got {}",
                args.history_capacity
            )));
        }
        Ok(Self {
            history_capacity: args.history_capacity,
            log_level: args.log_level,
            log_file: args.log_file,
            trace_level: args.trace_level,
            raw_mode: !args.no_raw,
        })
    }
}
