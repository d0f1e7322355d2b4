// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber producer.
//!
//! A [`Subject`] broadcasts each [`StreamItem<T>`] to all active subscribers. It is the
//! push-side entry point for values that change imperatively, such as a user record
//! edited elsewhere in the application.
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers only receive items sent after subscribing.
//! - **Unbounded**: backed by unbounded channels (no backpressure).
//! - **Shared**: cheap to clone; all clones feed the same subscribers.
//! - **Error/close**: an error is delivered to every subscriber and closes the subject.
//!
//! ## Example
//!
//! ```
//! use viewstate_core::{StreamItem, Subject};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = Subject::<i32>::new();
//! let mut stream = subject.subscribe().unwrap();
//!
//! subject.next(1).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::{Producer, Result, StreamItem, ViewStateError};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

struct SubjectState<T> {
    closed: bool,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
}

/// Listener stream of a [`Subject`]. Dropping it detaches from the subject.
pub struct SubjectStream<T> {
    inner: Option<UnboundedReceiver<StreamItem<T>>>,
}

impl<T> Stream for SubjectStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.inner.as_mut() {
            Some(rx) => Pin::new(rx).poll_next(cx),
            None => Poll::Ready(None),
        }
    }
}

/// A hot, unbounded subject that broadcasts items to all current subscribers.
///
/// See the [module documentation](self) for details.
pub struct Subject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribes to the subject.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError::SubjectClosed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(ViewStateError::SubjectClosed);
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        debug!("subject subscribed, {} active subscribers", state.senders.len());
        Ok(SubjectStream { inner: Some(rx) })
    }

    /// Sends an item to all active subscribers, pruning the ones that detached.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError::SubjectClosed` if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(ViewStateError::SubjectClosed);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        Ok(())
    }

    /// Sends a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError::SubjectClosed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<()> {
        self.send(StreamItem::Value(value))
    }

    /// Sends an error to all subscribers and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError::SubjectClosed` if the subject was already closed.
    pub fn error(&self, err: ViewStateError) -> Result<()> {
        let result = self.send(StreamItem::Error(err));
        self.close();
        result
    }

    /// Closes the subject, completing all subscriber streams. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of live subscribers. Subscribers whose stream was dropped are pruned first.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.state.lock();
        state.senders.retain(|tx| !tx.is_closed());
        state.senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

/// Attaching to a closed subject yields an already-completed producer.
impl<T: Clone + Send + 'static> Producer for Subject<T> {
    type Value = T;
    type Stream = SubjectStream<T>;

    fn attach(self) -> Self::Stream {
        (&self).attach()
    }
}

impl<T: Clone + Send + 'static> Producer for &Subject<T> {
    type Value = T;
    type Stream = SubjectStream<T>;

    fn attach(self) -> Self::Stream {
        self.subscribe()
            .unwrap_or(SubjectStream { inner: None })
    }
}
