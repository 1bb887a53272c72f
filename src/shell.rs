use crate::command::CommandTable;
use crate::completion;
use crate::config::ShellConfig;
use crate::dispatch::{Outcome, dispatch};
use crate::editor::{BACKSPACE, CTRL_C, CTRL_N, CTRL_P, CTRL_U, DEL, ESC, LineEditor, TAB};
use crate::env::Environment;
use crate::error::ShellError;
use crate::history::HistoryRing;
use anyhow::{Context, Result};
use std::io::{Read, Write};

/// The whole state of one interactive shell.
///
/// Bytes are fed one at a time with [`Shell::process_byte`]; each byte is handled
/// to completion, including any command it triggers, before the next one.
///
/// Example
/// ```
/// use line_shell::Shell;
/// let mut sh = Shell::default();
/// let mut out = Vec::new();
/// sh.run(&b"log 7\rlog\r"[..], &mut out).unwrap();
/// assert_eq!(sh.env().log_level, 7);
/// ```
#[derive(Debug)]
pub struct Shell {
    editor: LineEditor,
    history: HistoryRing,
    env: Environment,
    commands: CommandTable,
}

impl Shell {
    /// Create a shell with the built-in commands.
    pub fn new(config: &ShellConfig) -> Result<Self, ShellError> {
        Self::with_commands(config, CommandTable::default())
    }

    /// Create a shell with a custom, name-sorted command table.
    pub fn with_commands(config: &ShellConfig, commands: CommandTable) -> Result<Self, ShellError> {
        Ok(Self {
            editor: LineEditor::new(),
            history: HistoryRing::new(config.history_capacity)?,
            env: Environment::new(config.log_level),
            commands,
        })
    }

    pub fn line(&self) -> &[u8] {
        self.editor.line()
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Handles one input byte. Returns the dispatch outcome when the byte
    /// finished a line.
    ///
    /// # Errors
    ///
    /// Fails only when writing to `out` fails.
    pub fn process_byte(&mut self, byte: u8, out: &mut dyn Write) -> Result<Option<Outcome>> {
        match byte {
            CTRL_P => self.recall_previous(out)?,
            CTRL_N => self.recall_next(out)?,
            CTRL_U => self.editor.kill(out)?,
            b'\r' | b'\n' => return self.enter(out).map(Some),
            0 => {}
            TAB => self.complete(out)?,
            BACKSPACE | DEL => self.editor.backspace(out)?,
            // raw-mode convenience: the terminal no longer turns Ctrl-C into
            // SIGINT, so the byte ends the session instead of being inserted
            CTRL_C => self.env.should_exit = true,
            ESC => {
                self.editor.push_silent(ESC);
            }
            b'A' | b'B' if self.editor.ends_with_escape_prefix() => {
                self.editor.drop_escape_prefix(out)?;
                if byte == b'A' {
                    self.recall_previous(out)?;
                } else {
                    self.recall_next(out)?;
                }
            }
            _ => {
                self.editor.push(byte, out)?;
            }
        }
        Ok(None)
    }

    /// Feeds `input` byte by byte until it ends or a command asks to exit.
    ///
    /// # Errors
    ///
    /// Fails when reading `input` or writing `out` fails.
    pub fn run(&mut self, input: impl Read, out: &mut dyn Write) -> Result<()> {
        for byte in input.bytes() {
            let byte = byte.context("failed to read input")?;
            self.process_byte(byte, out)?;
            out.flush()?;
            if self.env.should_exit {
                tracing::info!("exit requested");
                break;
            }
        }
        Ok(())
    }

    fn enter(&mut self, out: &mut dyn Write) -> Result<Outcome> {
        let result = dispatch(
            self.editor.line(),
            &self.commands,
            &mut self.history,
            &mut self.env,
            out,
        );
        self.editor.clear();
        self.history.reset_navigation();
        result
    }

    fn complete(&mut self, out: &mut dyn Write) -> Result<()> {
        let names = self.commands.names();
        for byte in completion::extension(&names, self.editor.line()) {
            if !self.editor.push(byte, out)? {
                break;
            }
        }
        Ok(())
    }

    fn recall_previous(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.history.navigate_previous() {
            self.editor.replace(&self.history.recall(), out)?;
        }
        Ok(())
    }

    fn recall_next(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.history.navigate_next() {
            self.editor.replace(&self.history.recall(), out)?;
        }
        Ok(())
    }
}

impl Default for Shell {
    /// A shell with the built-in commands and default history capacity.
    fn default() -> Self {
        Self {
            editor: LineEditor::new(),
            history: HistoryRing::default(),
            env: Environment::default(),
            commands: CommandTable::default(),
        }
    }
}
