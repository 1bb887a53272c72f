use crossterm::terminal;
use std::io::{Result as IoResult, Write};

/// Writer that turns every `\n` into `\r\n`.
///
/// A terminal in raw mode no longer returns the carriage on line feed, so the
/// shell and its handlers keep writing plain `\n` and this adapter fixes the
/// output on the way to the screen.
#[derive(Debug)]
pub struct CrlfWriter<W: Write> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        for chunk in data.split_inclusive(|&b| b == b'\n') {
            match chunk.split_last() {
                Some((&b'\n', line)) => {
                    self.inner.write_all(line)?;
                    self.inner.write_all(b"\r\n")?;
                }
                _ => self.inner.write_all(chunk)?,
            }
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.inner.flush()
    }
}

/// Keeps the controlling terminal in raw mode while alive.
///
/// Input then arrives one byte at a time, without line buffering or local echo,
/// which is what the line editor expects. Dropping the guard restores the
/// previous mode, also when the shell unwinds from an error.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> IoResult<Self> {
        terminal::enable_raw_mode()?;
        tracing::debug!("raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}
