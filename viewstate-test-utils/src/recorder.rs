// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::timeout;
use viewstate_core::ViewStateError;

/// One subscription callback invocation.
#[derive(Debug, Clone)]
pub enum RecordedEvent<T> {
    Value(T),
    Error(ViewStateError),
    Complete,
}

/// Hands out subscription callbacks and records their invocations in order.
///
/// ```rust
/// use viewstate_test_utils::{CallbackRecorder, RecordedEvent};
///
/// # async fn example() {
/// let mut recorder = CallbackRecorder::<i32>::new();
/// let on_value = recorder.on_value();
///
/// on_value(1);
///
/// assert!(matches!(recorder.next_event(100).await, RecordedEvent::Value(1)));
/// # }
/// ```
pub struct CallbackRecorder<T> {
    tx: UnboundedSender<RecordedEvent<T>>,
    rx: UnboundedReceiver<RecordedEvent<T>>,
}

impl<T: Send + 'static> CallbackRecorder<T> {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn on_value(&self) -> impl Fn(T) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |value| {
            let _ = tx.send(RecordedEvent::Value(value));
        }
    }

    pub fn on_error(&self) -> impl Fn(ViewStateError) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |error| {
            let _ = tx.send(RecordedEvent::Error(error));
        }
    }

    pub fn on_complete(&self) -> impl Fn() + Send + Sync + 'static {
        let tx = self.tx.clone();
        move || {
            let _ = tx.send(RecordedEvent::Complete);
        }
    }

    /// Waits for the next recorded event.
    ///
    /// # Panics
    ///
    /// Panics if nothing is recorded within `timeout_ms`.
    pub async fn next_event(&mut self, timeout_ms: u64) -> RecordedEvent<T> {
        match timeout(Duration::from_millis(timeout_ms), self.rx.recv()).await {
            Ok(Some(event)) => event,
            Ok(None) => unreachable!("the recorder keeps its own sender alive"),
            Err(_) => panic!("Expected a callback within {timeout_ms}ms"),
        }
    }

    /// Waits for the next event and unwraps it as a value.
    ///
    /// # Panics
    ///
    /// Panics on timeout or if the next event is an error or a completion.
    pub async fn next_value(&mut self, timeout_ms: u64) -> T {
        match self.next_event(timeout_ms).await {
            RecordedEvent::Value(value) => value,
            RecordedEvent::Error(e) => panic!("Expected a value callback, got error: {e}"),
            RecordedEvent::Complete => panic!("Expected a value callback, got completion"),
        }
    }

    /// Panics if any callback fires within `timeout_ms`.
    pub async fn assert_silent(&mut self, timeout_ms: u64) {
        if timeout(Duration::from_millis(timeout_ms), self.rx.recv())
            .await
            .is_ok()
        {
            panic!("Expected no callback within {timeout_ms}ms");
        }
    }
}

impl<T: Send + 'static> Default for CallbackRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
