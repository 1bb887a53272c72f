use crate::command::{Command, Session};
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use chrono::Local;

/// Built-in commands known to the shell at compile time.
///
/// Arguments are split on whitespace and parsed with the [`argh`] crate
/// (`FromArgs`); the command then runs in-process against the [`Session`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "date" or "log".
    fn name() -> &'static str;

    /// One-line description shown by `help`.
    fn description() -> &'static str;

    /// Usage line printed when the arguments do not parse.
    fn syntax() -> &'static str {
        Self::name()
    }

    /// Whether the argument text is handed to argh. Commands that return
    /// `false` ignore whatever follows their name.
    fn takes_args() -> bool {
        false
    }

    fn execute(self, session: &mut Session<'_>) -> Result<()>;
}

/// Wraps a builtin into a table [`Command`].
pub(crate) fn builtin<T: BuiltinCommand + 'static>() -> Command {
    Command::new(T::name(), T::description(), |session, args| {
        let argv: Vec<&str> = args
            .filter(|_| T::takes_args())
            .map(|a| a.split_whitespace().collect())
            .unwrap_or_default();
        match T::from_args(&[T::name()], &argv) {
            Ok(cmd) => cmd.execute(session),
            Err(EarlyExit { output, status }) => {
                if status.is_ok() {
                    writeln!(session.out, "{}", output.trim_end())?;
                } else {
                    writeln!(session.out, "syntax: {}", T::syntax())?;
                }
                Ok(())
            }
        }
    })
}

#[derive(FromArgs)]
/// Show the local date and time.
pub struct Date {}

impl BuiltinCommand for Date {
    fn name() -> &'static str {
        "date"
    }

    fn description() -> &'static str {
        "show the date and time"
    }

    fn execute(self, session: &mut Session<'_>) -> Result<()> {
        writeln!(session.out, "{}", Local::now().format("%c"))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Exit this environment.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn description() -> &'static str {
        "exit this environment"
    }

    fn execute(self, session: &mut Session<'_>) -> Result<()> {
        session.env.should_exit = true;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Show available commands.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "show available commands"
    }

    fn execute(self, session: &mut Session<'_>) -> Result<()> {
        for command in session.commands {
            writeln!(session.out, "{}\t{}", command.name, command.description)?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Show command history, oldest first.
pub struct History {}

impl BuiltinCommand for History {
    fn name() -> &'static str {
        "history"
    }

    fn description() -> &'static str {
        "show command history"
    }

    fn execute(self, session: &mut Session<'_>) -> Result<()> {
        for entry in session.history.list() {
            writeln!(session.out, "{}", String::from_utf8_lossy(&entry))?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Get or set the log level.
pub struct Log {
    #[argh(positional, from_str_fn(parse_level))]
    /// new log level; the current level is shown when omitted.
    pub level: Option<u32>,
}

/// Accepts plain decimal digits only; no sign, no whitespace.
fn parse_level(value: &str) -> Result<u32, String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("not an integer: {value}"));
    }
    value.parse().map_err(|e| format!("{value}: {e}"))
}

impl BuiltinCommand for Log {
    fn name() -> &'static str {
        "log"
    }

    fn description() -> &'static str {
        "get or set log level"
    }

    fn syntax() -> &'static str {
        "log [integer]"
    }

    fn takes_args() -> bool {
        true
    }

    fn execute(self, session: &mut Session<'_>) -> Result<()> {
        match self.level {
            Some(level) => {
                tracing::debug!(from = session.env.log_level, to = level, "log level changed");
                session.env.log_level = level;
            }
            None => writeln!(session.out, "{}", session.env.log_level)?,
        }
        Ok(())
    }
}
