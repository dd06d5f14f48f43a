//! Non-blocking channel that streams engine decisions to a logger.
//!
//! Request handling only ever calls [`DebugSink::log`], which never waits: when
//! the buffer is full the line is counted and discarded. A consumer task drains
//! the channel and forwards each line to the [`DebugLogger`].

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const LINE_PREFIX: &str = "[CORS]";

/// Logger capability consumed by the debug sink.
pub trait DebugLogger: Send + Sync + 'static {
    fn debug(&self, message: &str);
}

impl<F> DebugLogger for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn debug(&self, message: &str) {
        self(message)
    }
}

/// Forwards debug lines to `tracing` at `DEBUG` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl DebugLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "gateway_cors", "{message}");
    }
}

struct DebugWorker {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

pub struct DebugSink {
    sender: mpsc::Sender<String>,
    dropped: AtomicU64,
    worker: Mutex<Option<DebugWorker>>,
}

impl DebugSink {
    /// Starts the consumer on the current tokio runtime.
    ///
    /// Returns `None` outside a runtime; debug output is then disabled.
    pub fn spawn(logger: Arc<dyn DebugLogger>, capacity: usize) -> Option<Self> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!(error = %err, "no tokio runtime, CORS debug output disabled");
                return None;
            }
        };

        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = runtime.spawn(consume(receiver, shutdown_rx, logger));

        Some(Self {
            sender,
            dropped: AtomicU64::new(0),
            worker: Mutex::new(Some(DebugWorker { shutdown, handle })),
        })
    }

    pub fn log<S: Into<String>>(&self, line: S) {
        match self.sender.try_send(line.into()) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Lines discarded because the buffer was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stops accepting lines, forwards everything already buffered and waits
    /// for the consumer to finish. Later calls return immediately.
    pub async fn shutdown(&self) {
        let worker = self.worker.lock().take();
        let Some(worker) = worker else {
            return;
        };

        let _ = worker.shutdown.send(());
        if let Err(err) = worker.handle.await {
            tracing::warn!(error = %err, "CORS debug consumer terminated abnormally");
        }
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugSink")
            .field("dropped", &self.dropped())
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

async fn consume(
    mut receiver: mpsc::Receiver<String>,
    mut shutdown: oneshot::Receiver<()>,
    logger: Arc<dyn DebugLogger>,
) {
    loop {
        tokio::select! {
            line = receiver.recv() => match line {
                Some(line) => forward(logger.as_ref(), &line),
                None => return,
            },
            _ = &mut shutdown => break,
        }
    }

    receiver.close();
    while let Some(line) = receiver.recv().await {
        forward(logger.as_ref(), &line);
    }
}

fn forward(logger: &dyn DebugLogger, line: &str) {
    logger.debug(&format!("{LINE_PREFIX} {line}"));
}

#[cfg(test)]
#[path = "debug_test.rs"]
mod debug_test;
