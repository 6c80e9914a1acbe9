//! Listener that reports changes as plain text.

use crate::error::ListenerError;
use crate::notify::Listener;
use crate::state::FileState;
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Prints a short report for every received state.
///
/// An existing file is reported as:
///
/// ```text
/// State of file is changed:
/// File exists
/// File size: 10 byte
///
/// ```
///
/// and a missing one as:
///
/// ```text
/// State of file is changed:
/// File does not exist
///
/// ```
///
/// A failed write is returned to the dispatcher as [`ListenerError::Io`].
#[derive(Debug)]
pub struct ConsoleListener<W> {
    out: Mutex<W>,
}

impl ConsoleListener<Stdout> {
    /// Report to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleListener<W> {
    /// Report to any writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Take back the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> Listener for ConsoleListener<W> {
    fn receive(&self, state: FileState) -> Result<(), ListenerError> {
        let mut out = self.out.lock();
        writeln!(out, "State of file is changed:")?;
        if state.exists() {
            writeln!(out, "File exists")?;
            writeln!(out, "File size: {} byte", state.size())?;
        } else {
            writeln!(out, "File does not exist")?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
