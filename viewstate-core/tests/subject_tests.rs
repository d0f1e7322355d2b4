// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use viewstate_core::{Producer, StreamItem, Subject, ViewStateError};

#[tokio::test]
async fn broadcasts_to_multiple_subscribers() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let mut a = subject.subscribe()?;
    let mut b = subject.subscribe()?;

    // Act
    subject.next(1)?;

    // Assert
    assert_eq!(a.next().await, Some(StreamItem::Value(1)));
    assert_eq!(b.next().await, Some(StreamItem::Value(1)));

    Ok(())
}

#[tokio::test]
async fn late_subscriber_misses_earlier_values() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let mut early = subject.subscribe()?;
    subject.next(1)?;

    // Act
    let mut late = subject.subscribe()?;
    subject.next(2)?;
    subject.close();

    // Assert
    assert_eq!(early.next().await, Some(StreamItem::Value(1)));
    assert_eq!(early.next().await, Some(StreamItem::Value(2)));
    assert_eq!(late.next().await, Some(StreamItem::Value(2)));
    assert_eq!(late.next().await, None);

    Ok(())
}

#[tokio::test]
async fn error_is_propagated_and_closes() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let mut stream = subject.subscribe()?;

    // Act
    subject.error(ViewStateError::producer_failure("boom"))?;

    // Assert
    assert!(matches!(
        stream.next().await,
        Some(StreamItem::Error(ViewStateError::ProducerFailure { .. }))
    ));
    assert_eq!(stream.next().await, None);
    assert!(subject.is_closed());

    Ok(())
}

#[tokio::test]
async fn send_and_subscribe_after_close_fail() {
    // Arrange
    let subject = Subject::<i32>::new();

    // Act
    subject.close();
    subject.close();

    // Assert
    assert!(matches!(subject.next(1), Err(ViewStateError::SubjectClosed)));
    assert!(matches!(subject.subscribe(), Err(ViewStateError::SubjectClosed)));
}

#[tokio::test]
async fn attaching_a_closed_subject_yields_a_completed_producer() {
    // Arrange
    let subject = Subject::<i32>::new();
    subject.close();

    // Act
    let mut stream = subject.attach();

    // Assert
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn dropped_subscribers_are_pruned_on_send() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let kept = subject.subscribe()?;
    let dropped = subject.subscribe()?;
    assert_eq!(subject.subscriber_count(), 2);

    // Act
    drop(dropped);
    subject.next(7)?;

    // Assert
    assert_eq!(subject.subscriber_count(), 1);
    drop(kept);

    Ok(())
}

#[tokio::test]
async fn subscriber_count_excludes_dropped_subscribers_without_a_send() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let stream = subject.subscribe()?;
    assert_eq!(subject.subscriber_count(), 1);

    // Act
    drop(stream);

    // Assert
    assert_eq!(subject.subscriber_count(), 0);

    Ok(())
}
