use crate::env::Environment;
use crate::history::HistoryRing;
use anyhow::Result;
use std::fmt;
use std::io::Write;

/// Everything a handler may touch while it runs.
///
/// The shell builds a fresh session for every dispatched line, borrowing its own
/// state, so handlers never hold on to shell internals.
pub struct Session<'a> {
    /// Output sink shared with the line editor's echo.
    pub out: &'a mut dyn Write,
    /// Mutable shell settings (log level, exit request).
    pub env: &'a mut Environment,
    /// History as it stands after the current line was committed.
    pub history: &'a HistoryRing,
    /// The table the current command was found in.
    pub commands: &'a CommandTable,
}

/// Handler invoked with the argument text that follows the command name, or
/// `None` when nothing follows it.
pub type Handler = Box<dyn Fn(&mut Session<'_>, Option<&str>) -> Result<()>>;

/// One registered command.
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: Handler,
}

impl Command {
    pub fn new<F>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        F: Fn(&mut Session<'_>, Option<&str>) -> Result<()> + 'static,
    {
        Self {
            name,
            description,
            handler: Box::new(handler),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered list of commands used by dispatch and completion.
///
/// The commands must be sorted by name in ascending byte order. Completion relies
/// on it; it is checked only in debug builds.
#[derive(Debug)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    pub fn new(commands: Vec<Command>) -> Self {
        debug_assert!(
            commands.windows(2).all(|w| w[0].name < w[1].name),
            "command table must be sorted by name"
        );
        Self { commands }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Command names, in table order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    /// Finds the command whose name is exactly `token`.
    pub fn find(&self, token: &[u8]) -> Option<&Command> {
        self.commands.iter().find(|c| c.name.as_bytes() == token)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandTable {
    /// The built-in commands: `date`, `exit`, `help`, `history`, `log`.
    fn default() -> Self {
        use crate::builtin::*;
        Self::new(vec![
            builtin::<Date>(),
            builtin::<Exit>(),
            builtin::<Help>(),
            builtin::<History>(),
            builtin::<Log>(),
        ])
    }
}

impl<'a> IntoIterator for &'a CommandTable {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
