use tokio::sync::watch;

/// Create a linked cancel handle/token pair.
///
/// The handle stays with whoever may abort the workflow (UI navigation,
/// HTTP cancel endpoint); the token travels into the polling loop.
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx: Some(rx) })
}

/// Requests cancellation of an in-flight workflow.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent; safe to call after the workflow
    /// already finished.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Observed by the polling loop between status checks and during the
/// inter-poll wait.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelToken {
    /// A token that can never be cancelled, for callers without an abort path.
    pub fn never() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    /// Resolves once cancellation is requested. Pends forever for `never`
    /// tokens and for handles dropped without cancelling.
    pub async fn cancelled(&self) {
        let Some(rx) = &self.rx else {
            return std::future::pending::<()>().await;
        };
        let mut rx = rx.clone();
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
        // Handle dropped without ever cancelling.
        std::future::pending::<()>().await
    }
}
