//! Session-wide Ctrl-C handling.

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

/// Routes Ctrl-C to the operation currently in flight.
///
/// A single SIGINT handler is installed for the whole session. At the
/// prompt the line editor reads Ctrl-C as a key, so the signal only ever
/// cancels the running page load or bulk select and never ends the process.
#[derive(Clone, Default)]
pub struct Interrupts {
    current: Arc<Mutex<CancellationToken>>,
}

impl Interrupts {
    /// Installs the handler on `runtime`.
    pub fn install(runtime: &Runtime) -> Self {
        let interrupts = Self::default();
        let watcher = interrupts.clone();
        runtime.spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                log::info!("interrupt received");
                watcher.cancel_current();
            }
        });
        interrupts
    }

    /// Starts a new operation and returns its cancellation token.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.lock() = token.clone();
        token
    }

    /// Cancels the most recently started operation.
    pub fn cancel_current(&self) {
        self.lock().cancel();
    }

    /// Runs `future` to completion unless interrupted first.
    ///
    /// Returns `None` if the operation was cancelled; the future is dropped.
    pub fn run<F: Future>(&self, runtime: &Runtime, future: F) -> Option<F::Output> {
        let cancel = self.begin();
        runtime.block_on(async {
            tokio::select! {
                output = future => Some(output),
                _ = cancel.cancelled() => None,
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, CancellationToken> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_reaches_only_current_operation() {
        let interrupts = Interrupts::default();
        let first = interrupts.begin();
        let second = interrupts.begin();

        interrupts.cancel_current();

        assert!(!first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_run_returns_none_when_cancelled() {
        let runtime = Runtime::new().unwrap();
        let interrupts = Interrupts::default();

        let finished = interrupts.run(&runtime, async { 7 });
        assert_eq!(finished, Some(7));

        let canceller = interrupts.clone();
        let stalled = interrupts.run(&runtime, async move {
            tokio::task::yield_now().await;
            canceller.cancel_current();
            std::future::pending::<()>().await;
        });
        assert_eq!(stalled, None);
    }
}
