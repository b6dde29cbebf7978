//! Cancellation signal shared between the batch loop and running tools.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Receiving side. Cheap to clone; every clone observes the same cancellation.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Sending side, held by whoever may cancel.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Keeps Ctrl-C mapped to cancellation while alive. Once dropped, the next
/// Ctrl-C exits the process with status 130.
#[derive(Debug)]
pub struct InterruptScope {
    active: Arc<AtomicBool>,
}

impl Drop for InterruptScope {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterruptAction {
    Cancel,
    Exit,
}

/// Only the first interrupt inside a live scope cancels; any other exits.
fn interrupt_action(active: &AtomicBool, handle: &CancelHandle) -> InterruptAction {
    if active.load(Ordering::SeqCst) && !handle.is_cancelled() {
        handle.cancel();
        InterruptAction::Cancel
    } else {
        InterruptAction::Exit
    }
}

impl CancelSignal {
    pub fn pair() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelSignal { rx })
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        let (_handle, signal) = Self::pair();
        signal
    }

    /// Fires on the first Ctrl-C while the returned scope is alive. A second
    /// Ctrl-C, or any Ctrl-C after the scope is dropped, exits the process
    /// with status 130. Must be called inside a tokio runtime.
    pub fn ctrl_c() -> (Self, InterruptScope) {
        let (handle, signal) = Self::pair();
        let active = Arc::new(AtomicBool::new(true));
        let scope = InterruptScope {
            active: Arc::clone(&active),
        };

        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match interrupt_action(&active, &handle) {
                    InterruptAction::Cancel => warn!(
                        "Interrupt received, stopping the running conversion (press Ctrl-C again to exit)"
                    ),
                    InterruptAction::Exit => std::process::exit(130),
                }
            }
        });

        (signal, scope)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested. Pends forever if the handle
    /// is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
