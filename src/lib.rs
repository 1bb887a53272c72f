//! An interactive line-editing command shell.
//!
//! Input is consumed one byte at a time. Printable bytes build up a command line
//! that can be edited in place (backspace, line kill), completed against the
//! command table with Tab, or replaced by earlier lines recalled from a
//! fixed-size history ring with the arrow keys. Enter dispatches the line to the
//! matching command handler.
//!
//! The main entry point is [`Shell`], which owns all state and is driven with
//! [`Shell::process_byte`] or [`Shell::run`]. The public modules [`command`] and
//! [`history`] expose the command table and the history ring for embedding and
//! testing.

mod builtin;
pub mod command;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod env;
pub mod error;
pub mod history;
pub mod io_adapters;
pub mod logging;
pub mod ring_index;
mod shell;

/// Just a convenient re-export of the shell state machine.
///
/// See [`Shell`] for the high-level API and examples.
pub use shell::Shell;
