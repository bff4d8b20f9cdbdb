//! Cancellation composition for forecast fetches
//!
//! Merges an optional caller-supplied cancellation token with a fetch
//! timeout into one effective token. The fetch path listens on the effective
//! token only; it does not need to know which source fired.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default deadline for a single forecast fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(8000);

/// One effective cancellation signal for a single fetch.
///
/// Fires when the caller's token fires or when the timeout elapses,
/// whichever comes first. The internal timer is a spawned task that is
/// aborted when the composition is dropped, so completing the fetch by any
/// means (success, failure, cancellation) leaves no dangling timer behind.
#[derive(Debug)]
pub struct FetchCancellation {
    effective: CancellationToken,
    timer: JoinHandle<()>,
}

impl FetchCancellation {
    /// Composes the caller's token (if any) with the given timeout.
    ///
    /// Without a caller token the effective signal is driven purely by the
    /// timeout. The timer starts immediately.
    pub fn new(caller: Option<&CancellationToken>, timeout: Duration) -> Self {
        let effective = match caller {
            Some(token) => token.child_token(),
            None => CancellationToken::new(),
        };

        let timer = tokio::spawn({
            let effective = effective.clone();
            async move {
                tokio::time::sleep(timeout).await;
                effective.cancel();
            }
        });

        Self { effective, timer }
    }

    /// Composes with the default fetch timeout.
    pub fn with_default_timeout(caller: Option<&CancellationToken>) -> Self {
        Self::new(caller, DEFAULT_FETCH_TIMEOUT)
    }

    /// The effective token to select against.
    pub fn token(&self) -> &CancellationToken {
        &self.effective
    }

    /// Resolves once either source has fired.
    pub async fn cancelled(&self) {
        self.effective.cancelled().await;
    }
}

impl Drop for FetchCancellation {
    fn drop(&mut self) {
        // Must hold on every exit path, and must never panic.
        self.timer.abort();
    }
}
