// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the viewstate workspace.
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: imperatively-fed producers
//! - [`profile`]: the user / topics / friends fixtures of a profile view
//! - [`helpers`]: timed assertions over streams
//! - [`recorder`]: captures subscription callbacks for later assertions

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod profile;
pub mod recorder;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use viewstate_core::StreamItem;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value};
pub use profile::ProfileData;
pub use recorder::{CallbackRecorder, RecordedEvent};

/// Creates a producer fed through a channel; values are wrapped in `StreamItem::Value`.
///
/// Dropping the sender completes the producer.
///
/// ```rust
/// use viewstate_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut producer) = test_channel();
/// tx.send(42).unwrap();
/// assert_eq!(producer.next().await.unwrap().unwrap(), 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a producer that accepts raw `StreamItem<T>`s, for error propagation tests.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
