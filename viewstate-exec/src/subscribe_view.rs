// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::delivery::{Callbacks, Delivery};
use crate::handle::SubscriptionHandle;
use futures::Stream;
use std::sync::Arc;
use viewstate_core::{StreamItem, ViewStateError};

/// Extension trait subscribing a presentation layer to a view-state stream.
pub trait SubscribeViewExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Spawns a task that delivers every value of the stream to `on_value`.
    ///
    /// # Behavior
    ///
    /// - Values are delivered in stream order, one callback at a time.
    /// - A `StreamItem::Error` is handed to `on_error` and ends the subscription. Without
    ///   an `on_error` callback the error is logged.
    /// - When the stream ends on its own, `on_complete` is called.
    /// - Releasing the returned handle ends the subscription without calling
    ///   `on_error` or `on_complete`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::mpsc;
    /// use viewstate_core::Subject;
    /// use viewstate_exec::SubscribeViewExt;
    /// use viewstate_stream::aggregate;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> viewstate_core::Result<()> {
    /// let user = Subject::new();
    /// let (rendered_tx, rendered_rx) = mpsc::channel();
    ///
    /// let handle = aggregate([("user", user.clone())])?.subscribe_view(
    ///     move |state| {
    ///         let _ = rendered_tx.send(state.get("user").cloned());
    ///     },
    ///     None::<fn(viewstate_core::ViewStateError)>,
    ///     None::<fn()>,
    /// );
    ///
    /// user.next("Mark".to_string())?;
    /// # tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    /// assert_eq!(rendered_rx.recv().unwrap(), Some("Mark".to_string()));
    ///
    /// handle.release();
    /// assert!(handle.is_released());
    /// # Ok(())
    /// # }
    /// ```
    fn subscribe_view<OnValue, OnError, OnComplete>(
        self,
        on_value: OnValue,
        on_error: Option<OnError>,
        on_complete: Option<OnComplete>,
    ) -> SubscriptionHandle
    where
        OnValue: FnMut(T) + Send + 'static,
        OnError: FnOnce(ViewStateError) + Send + 'static,
        OnComplete: FnOnce() + Send + 'static;
}

impl<S, T> SubscribeViewExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn subscribe_view<OnValue, OnError, OnComplete>(
        self,
        on_value: OnValue,
        on_error: Option<OnError>,
        on_complete: Option<OnComplete>,
    ) -> SubscriptionHandle
    where
        OnValue: FnMut(T) + Send + 'static,
        OnError: FnOnce(ViewStateError) + Send + 'static,
        OnComplete: FnOnce() + Send + 'static,
    {
        let delivery = Arc::new(Delivery::new(Box::pin(self)));
        let callbacks = Callbacks::new(on_value, on_error, on_complete);

        tokio::spawn(Arc::clone(&delivery).run(callbacks));
        debug!("view subscription started");

        SubscriptionHandle::new(delivery)
    }
}
