// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning tokio channels into producers.

use futures::stream::{Map, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use viewstate_core::StreamItem;

/// A producer fed through a tokio unbounded channel.
///
/// The producer completes once every sender is dropped.
pub type ReceiverProducer<T> = Map<UnboundedReceiverStream<T>, fn(T) -> StreamItem<T>>;

/// Extension trait for `UnboundedReceiver` to register it as a producer.
pub trait UnboundedReceiverExt<T> {
    /// Wraps the receiver so that every received value becomes a `StreamItem::Value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokio::sync::mpsc;
    /// use viewstate::prelude::*;
    ///
    /// # fn example() -> viewstate::Result<()> {
    /// let (user_tx, user_rx) = mpsc::unbounded_channel::<String>();
    ///
    /// let view_state = Aggregation::new()
    ///     .role("user", user_rx.into_producer())
    ///     .build()?;
    ///
    /// user_tx.send("Mark".to_string()).unwrap();
    /// # drop(view_state);
    /// # Ok(())
    /// # }
    /// ```
    fn into_producer(self) -> ReceiverProducer<T>;
}

impl<T: Send + 'static> UnboundedReceiverExt<T> for mpsc::UnboundedReceiver<T> {
    fn into_producer(self) -> ReceiverProducer<T> {
        UnboundedReceiverStream::new(self).map(StreamItem::Value as fn(T) -> StreamItem<T>)
    }
}
