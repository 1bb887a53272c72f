use thiserror::Error;

/// Typed failures raised by the shell library.
///
/// Handlers and the binary use [`anyhow`]; this enum covers the cases callers may
/// want to match on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// The history ring refused a record that can never fit.
    #[error("history entry of {len} bytes does not fit a {capacity} byte ring")]
    EntryTooLarge { len: usize, capacity: usize },

    /// A configuration value is outside its accepted range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
