//! Stack snapshots on demand.

use std::backtrace::Backtrace;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use tokio::signal::unix::SignalKind;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::signal_receiver;

/// Handle for a registered stack-trace writer.
///
/// Dropping the handle has the same effect as [`StackTraceWriter::unregister`].
#[derive(Debug)]
pub struct StackTraceWriter {
    stop: CancellationToken,
    task: JoinHandle<()>,
}

impl StackTraceWriter {
    /// Stops writing snapshots. No write starts after this returns.
    pub fn unregister(self) {}
}

impl Drop for StackTraceWriter {
    fn drop(&mut self) {
        self.stop.cancel();
        self.task.abort();
    }
}

/// Writes a stack snapshot to `sink` each time one of `kinds` is delivered.
///
/// Only the stack of the thread handling the signal can be captured; the
/// snapshot names that thread and carries its backtrace.
///
/// # Errors
///
/// Fails if a handler cannot be installed for one of `kinds`.
pub fn register_stack_trace_writer<W>(
    sink: Arc<Mutex<W>>,
    kinds: &[SignalKind],
) -> io::Result<StackTraceWriter>
where
    W: Write + Send + 'static,
{
    let mut signals = signal_receiver(kinds)?;
    let stop = CancellationToken::new();
    let guard = stop.clone();
    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = guard.cancelled() => break,
                received = signals.recv() => match received {
                    Some(kind) => {
                        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
                        if let Err(err) = write_snapshot(&mut *sink, kind) {
                            warn!(error = %err, "failed to write stack snapshot");
                        }
                    }
                    None => break,
                },
            }
        }
    });
    Ok(StackTraceWriter { stop, task })
}

fn write_snapshot(sink: &mut dyn Write, kind: SignalKind) -> io::Result<()> {
    let current = thread::current();
    let name = current.name().unwrap_or("<unnamed>");
    writeln!(sink, "=== received signal {} ===", kind.as_raw_value())?;
    writeln!(sink, "thread '{name}':")?;
    writeln!(sink, "{}", Backtrace::force_capture())?;
    sink.flush()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{raise, wait_for_idle_runtime};

    #[tokio::test]
    async fn test_writes_snapshot_on_signal() {
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));
        let writer = register_stack_trace_writer(sink.clone(), &[SignalKind::hangup()]).unwrap();

        raise(libc::SIGHUP);
        let mut written = String::new();
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            written = String::from_utf8_lossy(&sink.lock().unwrap()).into_owned();
            if !written.is_empty() {
                break;
            }
        }
        writer.unregister();

        assert!(written.starts_with(&format!("=== received signal {} ===\n", libc::SIGHUP)));
        assert!(written.contains("thread '"));
    }

    #[tokio::test]
    async fn test_unregister_stops_writes() {
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));
        let writer =
            register_stack_trace_writer(sink.clone(), &[SignalKind::window_change()]).unwrap();
        writer.unregister();
        wait_for_idle_runtime().await;

        raise(libc::SIGWINCH);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(sink.lock().unwrap().is_empty());
    }
}
