// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use viewstate_core::StreamItem;

/// Panics if `stream` yields anything (an item or its end) within `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected emission, expected no output but got {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Panics unless `stream` ends within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(item)) => panic!("Expected stream to end, but it emitted {item:?}"),
        Err(_) => panic!("Expected stream to end within {timeout_ms}ms"),
    }
}

/// Returns the next item of `stream`, panicking if it ends or stays silent for `timeout_ms`.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Expected an item, but the stream ended"),
        Err(_) => panic!("Expected an item within {timeout_ms}ms"),
    }
}

/// Unwraps a `StreamItem::Value`, panicking on errors.
pub fn unwrap_value<T>(item: StreamItem<T>) -> T {
    match item {
        StreamItem::Value(value) => value,
        StreamItem::Error(e) => panic!("Expected a value, got error: {e}"),
    }
}
