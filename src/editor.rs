//! Edit buffer and the echo that keeps the terminal in step with it.

use crate::history::MAX_ENTRY_LEN;
use std::io::{self, Write};

/// Capacity of the edit buffer. The last slot is reserved, so a line holds at
/// most `LINE_CAPACITY - 1` bytes, which is also the longest history entry.
pub const LINE_CAPACITY: usize = MAX_ENTRY_LEN + 1;

pub const BACKSPACE: u8 = 0x08;
pub const TAB: u8 = b'\t';
pub const CTRL_C: u8 = 0x03;
pub const CTRL_N: u8 = 0x0E;
pub const CTRL_P: u8 = 0x10;
pub const CTRL_U: u8 = 0x15;
pub const ESC: u8 = 0x1B;
pub const DEL: u8 = 0x7F;

/// Visually erases the character left of the terminal cursor.
const ERASE: &[u8] = b"\x08 \x08";

/// In-progress command line plus its insertion point.
#[derive(Debug, Clone)]
pub struct LineEditor {
    buf: [u8; LINE_CAPACITY],
    index: usize,
}

impl LineEditor {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_CAPACITY],
            index: 0,
        }
    }

    /// Bytes typed so far.
    pub fn line(&self) -> &[u8] {
        &self.buf[..self.index]
    }

    /// Current cursor position, equal to the line length.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    pub fn is_full(&self) -> bool {
        self.index >= LINE_CAPACITY - 1
    }

    /// Appends `byte` and echoes it. Returns `false` when the buffer is full and
    /// the byte was dropped.
    pub fn push(&mut self, byte: u8, out: &mut dyn Write) -> io::Result<bool> {
        if !self.push_silent(byte) {
            return Ok(false);
        }
        out.write_all(&[byte])?;
        Ok(true)
    }

    /// Appends `byte` without echo.
    pub fn push_silent(&mut self, byte: u8) -> bool {
        if self.is_full() {
            tracing::debug!(byte, "edit buffer full, byte dropped");
            return false;
        }
        self.buf[self.index] = byte;
        self.index += 1;
        self.buf[self.index] = 0;
        true
    }

    /// Removes the last byte. An escape byte was never echoed, so it is removed
    /// without erasing anything on screen.
    pub fn backspace(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if self.index == 0 {
            return Ok(());
        }
        self.index -= 1;
        let removed = self.buf[self.index];
        self.buf[self.index] = 0;
        if removed != ESC {
            out.write_all(ERASE)?;
        }
        Ok(())
    }

    /// Erases the whole line.
    pub fn kill(&mut self, out: &mut dyn Write) -> io::Result<()> {
        while self.index > 0 {
            self.backspace(out)?;
        }
        Ok(())
    }

    /// Whether the last two bytes are ESC `[`, the prefix of an arrow key.
    pub fn ends_with_escape_prefix(&self) -> bool {
        self.line().ends_with(&[ESC, b'['])
    }

    /// Drops a trailing ESC `[` so that no part of an arrow sequence stays on
    /// the line.
    pub fn drop_escape_prefix(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if self.ends_with_escape_prefix() {
            self.backspace(out)?;
            self.backspace(out)?;
        }
        Ok(())
    }

    /// Erases the displayed line and renders `entry` in its place. ESC bytes
    /// are restored without echo, as when typed.
    pub fn replace(&mut self, entry: &[u8], out: &mut dyn Write) -> io::Result<()> {
        self.kill(out)?;
        for &byte in entry {
            let stored = if byte == ESC {
                self.push_silent(byte)
            } else {
                self.push(byte, out)?
            };
            if !stored {
                break;
            }
        }
        Ok(())
    }

    /// Empties the buffer without touching the screen.
    pub fn clear(&mut self) {
        self.index = 0;
        self.buf[0] = 0;
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}
