//! Signal helpers for Unix processes.
//!
//! Every function here spawns Tokio tasks and must be called from within a
//! Tokio runtime. Signal handlers are installed when the function is called,
//! so a signal raised right after it returns is observed.

#![cfg(unix)]

mod stacks;

use std::io;

use tokio::signal::unix::signal;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use stacks::{StackTraceWriter, register_stack_trace_writer};
pub use tokio::signal::unix::SignalKind;

/// Forwards every delivery of any of `kinds` to the returned receiver.
///
/// Forwarding tasks exit once the receiver is dropped. An empty `kinds`
/// yields a receiver that is already closed.
///
/// # Errors
///
/// Fails if a handler cannot be installed for one of `kinds`.
pub fn signal_receiver(kinds: &[SignalKind]) -> io::Result<UnboundedReceiver<SignalKind>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut streams = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        streams.push((kind, signal(kind)?));
    }
    for (kind, mut stream) in streams {
        let tx = tx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    received = stream.recv() => {
                        if received.is_none() {
                            break;
                        }
                        debug!(?kind, "signal received");
                        if tx.send(kind).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }
    Ok(rx)
}

/// Returns a child of `parent` that is also cancelled when any of `kinds`
/// is delivered.
///
/// # Examples
///
/// ```no_run
/// use command_dispatch_signals::{SignalKind, cancel_on_signals};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn walk(_: CancellationToken) {}
/// # async fn demo() -> std::io::Result<()> {
/// let token = cancel_on_signals(
///     &CancellationToken::new(),
///     &[SignalKind::interrupt(), SignalKind::terminate()],
/// )?;
/// walk(token).await;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails if a handler cannot be installed for one of `kinds`.
pub fn cancel_on_signals(
    parent: &CancellationToken,
    kinds: &[SignalKind],
) -> io::Result<CancellationToken> {
    let token = parent.child_token();
    let mut signals = signal_receiver(kinds)?;
    let guard = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = guard.cancelled() => {}
            Some(kind) = signals.recv() => {
                debug!(?kind, "cancelling on signal");
                guard.cancel();
            }
        }
    });
    Ok(token)
}
