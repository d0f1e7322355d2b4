// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Derive secondary objects (form models, view models) from each composite before it
//! reaches the presentation layer.

use crate::CompositeValue;
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use viewstate_core::{Result, StreamItem};

/// Extension trait adding derive operators to streams of composite values.
///
/// The operators hold no subscription of their own; they transform whatever the
/// upstream yields, passing errors through and ending after the first one.
pub trait DeriveExt<V>: Stream<Item = StreamItem<CompositeValue<V>>> + Sized {
    /// Maps every composite through a pure derive function.
    ///
    /// ```
    /// use futures::{stream, StreamExt};
    /// use viewstate_core::{Role, StreamItem};
    /// use viewstate_stream::{CompositeValue, DeriveExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let composite = CompositeValue::new(vec![(Role::from("user"), "Mark")]);
    /// let mut greetings = stream::iter(vec![StreamItem::Value(composite)])
    ///     .derive_with(|state| format!("Hello, {}", state.get("user").unwrap()));
    ///
    /// assert_eq!(greetings.next().await.unwrap().unwrap(), "Hello, Mark");
    /// # }
    /// ```
    fn derive_with<D, F>(self, f: F) -> Derived<Self, Pure<F>>
    where
        F: FnMut(&CompositeValue<V>) -> D,
    {
        Derived::new(self, Pure(f))
    }

    /// Like [`derive_with`](Self::derive_with) for derive functions that can fail.
    ///
    /// A failure is yielded as `StreamItem::Error` and ends the stream.
    fn try_derive_with<D, F>(self, f: F) -> Derived<Self, Fallible<F>>
    where
        F: FnMut(&CompositeValue<V>) -> Result<D>,
    {
        Derived::new(self, Fallible(f))
    }
}

impl<S, V> DeriveExt<V> for S where S: Stream<Item = StreamItem<CompositeValue<V>>> {}

/// A derive function applied by [`Derived`].
pub trait DeriveFn<V> {
    type Output;

    fn call(&mut self, composite: &CompositeValue<V>) -> Result<Self::Output>;
}

/// Infallible derive function, see [`DeriveExt::derive_with`].
pub struct Pure<F>(F);

impl<V, D, F> DeriveFn<V> for Pure<F>
where
    F: FnMut(&CompositeValue<V>) -> D,
{
    type Output = D;

    fn call(&mut self, composite: &CompositeValue<V>) -> Result<D> {
        Ok((self.0)(composite))
    }
}

/// Fallible derive function, see [`DeriveExt::try_derive_with`].
pub struct Fallible<F>(F);

impl<V, D, F> DeriveFn<V> for Fallible<F>
where
    F: FnMut(&CompositeValue<V>) -> Result<D>,
{
    type Output = D;

    fn call(&mut self, composite: &CompositeValue<V>) -> Result<D> {
        (self.0)(composite)
    }
}

/// Stream returned by [`DeriveExt::derive_with`] and [`DeriveExt::try_derive_with`].
#[pin_project]
pub struct Derived<S, P> {
    #[pin]
    stream: S,
    derive: P,
    done: bool,
}

impl<S, P> Derived<S, P> {
    fn new(stream: S, derive: P) -> Self {
        Self {
            stream,
            derive,
            done: false,
        }
    }
}

impl<S, V, P> Stream for Derived<S, P>
where
    S: Stream<Item = StreamItem<CompositeValue<V>>>,
    P: DeriveFn<V>,
{
    type Item = StreamItem<P::Output>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        match this.stream.poll_next(cx) {
            Poll::Ready(Some(StreamItem::Value(composite))) => {
                let item = StreamItem::from(this.derive.call(&composite));
                *this.done = item.is_error();
                Poll::Ready(Some(item))
            }
            Poll::Ready(Some(StreamItem::Error(error))) => {
                *this.done = true;
                Poll::Ready(Some(StreamItem::Error(error)))
            }
            Poll::Ready(None) => {
                *this.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
