/*!
 * Resettable one-shot timer on the tokio runtime.
 *
 * Scheduling again replaces the pending callback instead of stacking a second
 * one. Dropping the timer cancels whatever is pending.
 */

use std::time::Duration;
use tokio::task::JoinHandle;

/// One-shot deferred callback
#[derive(Debug, Default)]
pub struct DeferredTimer {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` after `delay`, cancelling anything still pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Drop the pending callback, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a callback is scheduled and has not run yet
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DeferredTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
