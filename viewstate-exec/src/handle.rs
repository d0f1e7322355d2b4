// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::sync::Arc;

/// The subscription-side operations a handle needs, independent of the value type.
pub(crate) trait Release: Send + Sync {
    fn release(&self);

    fn is_released(&self) -> bool;

    fn is_finished(&self) -> bool;
}

/// Handle to a running view subscription.
///
/// Returned by [`subscribe_view`](crate::SubscribeViewExt::subscribe_view). Releasing
/// the handle ends delivery and detaches from every producer behind the stream in one
/// step. Dropping the handle releases it as well, so a component that is torn down
/// cannot leave producers attached.
///
/// # Guarantees
///
/// - [`release`](Self::release) is synchronous and idempotent.
/// - Once `release` returns, no callback of this subscription runs again. A callback
///   already running on another thread is waited for.
/// - `release` may be called from inside the subscription's own callbacks.
#[must_use = "dropping a SubscriptionHandle releases the subscription"]
pub struct SubscriptionHandle {
    inner: Arc<dyn Release>,
}

impl SubscriptionHandle {
    #[cfg_attr(not(feature = "runtime-tokio"), allow(dead_code))]
    pub(crate) fn new(inner: Arc<dyn Release>) -> Self {
        Self { inner }
    }

    /// Ends delivery and detaches from all producers.
    pub fn release(&self) {
        self.inner.release();
    }

    /// Returns `true` once [`release`](Self::release) has completed.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.inner.is_released()
    }

    /// Returns `true` once the delivery task has stopped, whether the stream ended,
    /// failed, or the subscription was released.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.inner.release();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("released", &self.is_released())
            .field("finished", &self.is_finished())
            .finish()
    }
}
