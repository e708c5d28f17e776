//! Cancellation handles threaded through a request config.
//!
//! The client never cancels anything itself. A transport that supports
//! cancellation watches the signal and gives up on the exchange when it fires.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Owner side: call [`abort`](Self::abort) to fire every signal it handed out.
#[derive(Debug, Clone, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    pub fn abort(&self) {
        self.signal.token.cancel();
    }
}

/// Observer side. Clones observe the same underlying token and compare equal.
#[derive(Clone, Default)]
pub struct AbortSignal {
    token: Arc<CancellationToken>,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal fires.
    pub fn aborted(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

impl From<CancellationToken> for AbortSignal {
    fn from(token: CancellationToken) -> Self {
        Self { token: Arc::new(token) }
    }
}

impl PartialEq for AbortSignal {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.token, &other.token)
    }
}

impl fmt::Debug for AbortSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortSignal").field("aborted", &self.is_aborted()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_fires_all_handed_out_signals() {
        let controller = AbortController::new();
        let first = controller.signal();
        let second = controller.signal();
        assert!(!first.is_aborted());

        controller.abort();
        assert!(first.is_aborted());
        assert!(second.is_aborted());
    }

    #[test]
    fn signals_compare_by_identity() {
        let a = AbortController::new();
        let b = AbortController::new();
        assert_eq!(a.signal(), a.signal());
        assert_ne!(a.signal(), b.signal());
    }

    #[test]
    fn wraps_an_existing_token() {
        let token = CancellationToken::new();
        let signal = AbortSignal::from(token.clone());
        token.cancel();
        assert!(signal.is_aborted());
    }

    #[tokio::test]
    async fn aborted_future_resolves_after_abort() {
        let controller = AbortController::new();
        let signal = controller.signal();
        controller.abort();
        signal.aborted().await;
    }
}
