use crate::command::{CommandTable, Session};
use crate::env::Environment;
use crate::history::HistoryRing;
use anyhow::Result;
use std::io::Write;
use tracing::{debug, warn};

/// What happened to a finalized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing before the first space; ignored.
    Empty,
    /// A command ran (its own failure, if any, was already reported).
    Executed,
    /// The first word names no command.
    Invalid,
}

/// Runs a finalized `line` against `commands`.
///
/// The first space-delimited word must equal a command name. On a match the
/// whole line is committed to `history` and the handler receives the text after
/// the name and its spaces, or `None` if there is none. Unknown commands print
/// `invalid command` and are not committed.
///
/// # Errors
///
/// Only failures to write to `out` are returned; a handler error is printed as
/// `<name>: <error>` and dispatch still succeeds.
pub fn dispatch(
    line: &[u8],
    commands: &CommandTable,
    history: &mut HistoryRing,
    env: &mut Environment,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let token_len = line.iter().position(|&b| b == b' ').unwrap_or(line.len());
    if token_len == 0 {
        return Ok(Outcome::Empty);
    }

    let Some(command) = commands.find(&line[..token_len]) else {
        debug!(line = %String::from_utf8_lossy(line), "invalid command");
        write!(out, "\ninvalid command\n")?;
        return Ok(Outcome::Invalid);
    };

    if let Err(e) = history.commit(line) {
        warn!(error = %e, "line not added to history");
    }

    let rest = &line[token_len..];
    let args_start = rest.iter().position(|&b| b != b' ').unwrap_or(rest.len());
    let text = String::from_utf8_lossy(&rest[args_start..]);
    let args = (!text.is_empty()).then_some(&*text);

    out.write_all(b"\n")?;
    debug!(command = command.name, ?args, "dispatch");
    let mut session = Session {
        out: &mut *out,
        env,
        history,
        commands,
    };
    if let Err(e) = (command.handler)(&mut session, args) {
        writeln!(out, "{}: {e:#}", command.name)?;
    }
    Ok(Outcome::Executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(&'static str, Option<String>)>>>;

    fn recording_table(calls: &Calls) -> CommandTable {
        let record = |name: &'static str| {
            let calls = Rc::clone(calls);
            Command::new(name, "test", move |_session, args| {
                calls.borrow_mut().push((name, args.map(str::to_owned)));
                Ok(())
            })
        };
        CommandTable::new(vec![
            record("date"),
            record("exit"),
            record("help"),
            record("history"),
            record("log"),
        ])
    }

    struct Fixture {
        calls: Calls,
        table: CommandTable,
        history: HistoryRing,
        env: Environment,
        out: Vec<u8>,
    }

    impl Fixture {
        fn new() -> Self {
            let calls = Calls::default();
            let table = recording_table(&calls);
            Self {
                calls,
                table,
                history: HistoryRing::default(),
                env: Environment::default(),
                out: Vec::new(),
            }
        }

        fn dispatch(&mut self, line: &str) -> Outcome {
            dispatch(
                line.as_bytes(),
                &self.table,
                &mut self.history,
                &mut self.env,
                &mut self.out,
            )
            .unwrap()
        }

        fn history(&self) -> Vec<String> {
            self.history
                .list()
                .map(|e| String::from_utf8(e).unwrap())
                .collect()
        }
    }

    #[test]
    fn test_command_without_argument_gets_none() {
        let mut fx = Fixture::new();
        assert_eq!(fx.dispatch("date"), Outcome::Executed);
        assert_eq!(*fx.calls.borrow(), vec![("date", None)]);
        assert_eq!(fx.history(), vec!["date"]);
    }

    #[test]
    fn test_argument_follows_spaces() {
        let mut fx = Fixture::new();
        fx.dispatch("log 3");
        fx.dispatch("log    12 x");
        fx.dispatch("log   ");
        assert_eq!(
            *fx.calls.borrow(),
            vec![
                ("log", Some("3".to_owned())),
                ("log", Some("12 x".to_owned())),
                ("log", None),
            ]
        );
        assert_eq!(fx.history(), vec!["log 3", "log    12 x", "log   "]);
    }

    #[test]
    fn test_unknown_command_is_reported_and_not_committed() {
        let mut fx = Fixture::new();
        assert_eq!(fx.dispatch("zzz"), Outcome::Invalid);
        assert_eq!(fx.out, b"\ninvalid command\n");
        assert!(fx.calls.borrow().is_empty());
        assert!(fx.history().is_empty());
    }

    #[test]
    fn test_match_is_anchored_to_first_word() {
        let mut fx = Fixture::new();
        assert_eq!(fx.dispatch("logger"), Outcome::Invalid);
        assert_eq!(fx.dispatch("he"), Outcome::Invalid);
        assert!(fx.calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_line_does_nothing() {
        let mut fx = Fixture::new();
        assert_eq!(fx.dispatch(""), Outcome::Empty);
        assert_eq!(fx.dispatch("  date"), Outcome::Empty);
        assert!(fx.out.is_empty());
        assert!(fx.history().is_empty());
    }

    #[test]
    fn test_handler_error_is_printed() {
        let table = CommandTable::new(vec![Command::new("fail", "always fails", |_, _| {
            anyhow::bail!("boom")
        })]);
        let mut history = HistoryRing::default();
        let mut env = Environment::default();
        let mut out = Vec::new();
        let outcome = dispatch(b"fail now", &table, &mut history, &mut env, &mut out).unwrap();
        assert_eq!(outcome, Outcome::Executed);
        assert_eq!(String::from_utf8(out).unwrap(), "\nfail: boom\n");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_handler_sees_its_own_line_in_history() {
        let table = CommandTable::default();
        let mut history = HistoryRing::default();
        let mut env = Environment::default();
        let mut out = Vec::new();
        dispatch(b"log 4", &table, &mut history, &mut env, &mut out).unwrap();
        dispatch(b"history", &table, &mut history, &mut env, &mut out).unwrap();
        assert_eq!(env.log_level, 4);
        assert_eq!(String::from_utf8(out).unwrap(), "\n\nlog 4\nhistory\n");
    }
}
