// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handle::Release;
use futures::future::poll_fn;
use futures::StreamExt;
use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use viewstate_core::{BoxProducerStream, CancellationToken, StreamItem, ViewStateError};

/// State shared between a subscription's delivery task and its handle.
///
/// Lock order: `gate` before `source`. Neither lock is held across an await point.
pub(crate) struct Delivery<T> {
    /// Held while a callback runs; the cell is the released flag.
    gate: ReentrantMutex<Cell<bool>>,
    source: Mutex<Option<BoxProducerStream<T>>>,
    token: CancellationToken,
    finished: AtomicBool,
}

impl<T: Send + 'static> Delivery<T> {
    pub(crate) fn new(source: BoxProducerStream<T>) -> Self {
        Self {
            gate: ReentrantMutex::new(Cell::new(false)),
            source: Mutex::new(Some(source)),
            token: CancellationToken::new(),
            finished: AtomicBool::new(false),
        }
    }

    /// Pulls items from the source and dispatches them until the stream ends, fails,
    /// or the subscription is released.
    pub(crate) async fn run<OnValue, OnError, OnComplete>(
        self: Arc<Self>,
        mut callbacks: Callbacks<OnValue, OnError, OnComplete>,
    ) where
        OnValue: FnMut(T),
        OnError: FnOnce(ViewStateError),
        OnComplete: FnOnce(),
    {
        loop {
            let item = tokio::select! {
                biased;
                () = self.token.cancelled() => break,
                item = poll_fn(|cx| self.poll_source(cx)) => item,
            };

            if self.dispatch(item, &mut callbacks).is_break() {
                break;
            }
        }

        drop(self.source.lock().take());
        self.finished.store(true, Ordering::Release);
        debug!("view subscription finished");
    }

    fn poll_source(&self, cx: &mut Context<'_>) -> Poll<Option<StreamItem<T>>> {
        match self.source.lock().as_mut() {
            Some(source) => source.poll_next_unpin(cx),
            None => Poll::Ready(None),
        }
    }

    fn dispatch<OnValue, OnError, OnComplete>(
        &self,
        item: Option<StreamItem<T>>,
        callbacks: &mut Callbacks<OnValue, OnError, OnComplete>,
    ) -> ControlFlow<()>
    where
        OnValue: FnMut(T),
        OnError: FnOnce(ViewStateError),
        OnComplete: FnOnce(),
    {
        let released = self.gate.lock();
        if released.get() {
            return ControlFlow::Break(());
        }

        match item {
            Some(StreamItem::Value(value)) => {
                (callbacks.on_value)(value);
                ControlFlow::Continue(())
            }
            Some(StreamItem::Error(error)) => {
                match callbacks.on_error.take() {
                    Some(on_error) => on_error(error),
                    None => {
                        error!("view subscription failed: {}", error);
                    }
                }
                ControlFlow::Break(())
            }
            None => {
                if let Some(on_complete) = callbacks.on_complete.take() {
                    on_complete();
                }
                ControlFlow::Break(())
            }
        }
    }
}

impl<T: Send + 'static> Release for Delivery<T> {
    fn release(&self) {
        {
            let released = self.gate.lock();
            if released.replace(true) {
                return;
            }
        }

        drop(self.source.lock().take());
        self.token.cancel();
        debug!("view subscription released");
    }

    fn is_released(&self) -> bool {
        self.token.is_cancelled()
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

/// The callbacks of one subscription, owned by its delivery task.
pub(crate) struct Callbacks<OnValue, OnError, OnComplete> {
    on_value: OnValue,
    on_error: Option<OnError>,
    on_complete: Option<OnComplete>,
}

impl<OnValue, OnError, OnComplete> Callbacks<OnValue, OnError, OnComplete> {
    pub(crate) fn new(
        on_value: OnValue,
        on_error: Option<OnError>,
        on_complete: Option<OnComplete>,
    ) -> Self {
        Self {
            on_value,
            on_error,
            on_complete,
        }
    }
}
