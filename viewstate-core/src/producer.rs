// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::StreamItem;
use futures::Stream;
use std::pin::Pin;

/// A boxed listener stream obtained by attaching to a [`Producer`].
pub type BoxProducerStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

/// An asynchronous source of values that can be attached to and detached from.
///
/// Attaching returns the listener stream that receives subsequent emissions.
/// Detaching is dropping that stream. Producers may emit any number of values,
/// complete, fail with a [`StreamItem::Error`], or run forever; consumers must not
/// assume finiteness.
///
/// Every `Stream<Item = StreamItem<T>> + Send + 'static` is a producer, and so is
/// a [`Subject`](crate::Subject).
pub trait Producer: Sized {
    /// The type of values this producer emits.
    type Value: Send + 'static;
    /// The listener stream handed out on attach.
    type Stream: Stream<Item = StreamItem<Self::Value>> + Send + 'static;

    /// Attaches a listener and returns the stream of subsequent emissions.
    fn attach(self) -> Self::Stream;

    /// Attaches and boxes the listener stream.
    fn attach_boxed(self) -> BoxProducerStream<Self::Value> {
        Box::pin(self.attach())
    }
}

impl<S, T> Producer for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    type Value = T;
    type Stream = S;

    fn attach(self) -> Self::Stream {
        self
    }
}
