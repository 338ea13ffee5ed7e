//! Input/output/error stream triple shared by an App and its contexts.

use std::io::{self, Read, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Reader = Box<dyn Read + Send>;
type Writer = Box<dyn Write + Send>;

/// The streams an [`App`](crate::App) reads from and writes to.
///
/// Defaults to the process's standard streams. Each stream sits behind its
/// own mutex so one App can be run from several threads at once.
pub struct Streams {
    stdin: Mutex<Reader>,
    stdout: Mutex<Writer>,
    stderr: Mutex<Writer>,
}

impl Default for Streams {
    fn default() -> Self {
        Self {
            stdin: Mutex::new(Box::new(io::stdin())),
            stdout: Mutex::new(Box::new(io::stdout())),
            stderr: Mutex::new(Box::new(io::stderr())),
        }
    }
}

impl Streams {
    pub(crate) fn set_stdin(&mut self, reader: impl Read + Send + 'static) {
        self.stdin = Mutex::new(Box::new(reader));
    }

    pub(crate) fn set_stdout(&mut self, writer: impl Write + Send + 'static) {
        self.stdout = Mutex::new(Box::new(writer));
    }

    pub(crate) fn set_stderr(&mut self, writer: impl Write + Send + 'static) {
        self.stderr = Mutex::new(Box::new(writer));
    }

    /// Locks the input stream.
    pub fn stdin(&self) -> MutexGuard<'_, Reader> {
        self.stdin.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the output stream.
    pub fn stdout(&self) -> MutexGuard<'_, Writer> {
        self.stdout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the error stream.
    pub fn stderr(&self) -> MutexGuard<'_, Writer> {
        self.stderr.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Streams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Streams { .. }")
    }
}
