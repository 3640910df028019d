use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::error::TranslateError;

/// Cooperative cancellation flag shared between the CLI and a running
/// [`Driver`](super::Driver). Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as any clone, so this is unreachable
            // while `self` exists.
            std::future::pending::<()>().await;
        }
    }

    /// Sleeps for `duration` unless cancelled first.
    pub async fn sleep(&self, duration: Duration) -> Result<(), TranslateError> {
        if duration.is_zero() {
            return self.check();
        }
        tokio::select! {
            () = tokio::time::sleep(duration) => Ok(()),
            () = self.cancelled() => Err(TranslateError::Cancelled),
        }
    }

    /// Returns `Err(Cancelled)` if the token has been cancelled.
    pub fn check(&self) -> Result<(), TranslateError> {
        if self.is_cancelled() {
            Err(TranslateError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();

        assert!(clone.is_cancelled());
        assert!(matches!(clone.check(), Err(TranslateError::Cancelled)));
    }

    #[tokio::test]
    async fn test_sleep_completes_when_not_cancelled() {
        let token = CancelToken::new();
        assert!(token.sleep(Duration::from_millis(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_interrupts_sleep() {
        let token = CancelToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let result = token.sleep(Duration::from_secs(30)).await;

        assert!(matches!(result, Err(TranslateError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
