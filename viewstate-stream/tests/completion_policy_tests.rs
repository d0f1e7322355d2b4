// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use viewstate_stream::{aggregate, aggregate_with, Aggregation, CompletionPolicy};
use viewstate_test_utils::profile::{
    friends, friends_with_alice, topics, user_marcus, user_mark, FRIENDS, TOPICS, USER,
};
use viewstate_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, unwrap_value,
    ProfileData,
};

#[tokio::test]
async fn test_default_policy_is_keep_latest() -> anyhow::Result<()> {
    // Arrange
    let (_tx, user) = test_channel::<ProfileData>();

    // Act
    let view_state = aggregate([(USER, user)])?;

    // Assert
    assert_eq!(view_state.policy(), CompletionPolicy::KeepLatest);
    assert_eq!(
        Aggregation::<ProfileData>::new().build().unwrap_err().to_string(),
        "Aggregation requires at least one producer"
    );

    Ok(())
}

#[tokio::test]
async fn test_keep_latest_completed_producer_keeps_its_value() -> anyhow::Result<()> {
    // Arrange
    let (user_tx, user) = test_channel();
    let (topics_tx, topics_stream) = test_channel();
    let (friends_tx, friends_stream) = test_channel();
    let mut view_state = aggregate_with(
        CompletionPolicy::KeepLatest,
        [(USER, user), (TOPICS, topics_stream), (FRIENDS, friends_stream)],
    )?;
    user_tx.send(user_mark())?;
    topics_tx.send(topics())?;
    friends_tx.send(friends())?;
    unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Act
    drop(topics_tx);
    user_tx.send(user_marcus())?;

    // Assert
    let composite = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    assert_eq!(composite.get(USER), Some(&user_marcus()));
    assert_eq!(composite.get(TOPICS), Some(&topics()));

    // Act
    friends_tx.send(friends_with_alice())?;

    // Assert
    let composite = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    assert_eq!(composite.get(FRIENDS), Some(&friends_with_alice()));
    assert_eq!(composite.get(TOPICS), Some(&topics()));

    Ok(())
}

#[tokio::test]
async fn test_keep_latest_ends_when_all_producers_complete() -> anyhow::Result<()> {
    // Arrange
    let (user_tx, user) = test_channel();
    let (topics_tx, topics_stream) = test_channel();
    let mut view_state = aggregate([(USER, user), (TOPICS, topics_stream)])?;
    user_tx.send(user_mark())?;
    topics_tx.send(topics())?;
    unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Act
    drop(user_tx);

    // Assert
    assert_no_element_emitted(&mut view_state, 100).await;

    // Act
    drop(topics_tx);

    // Assert
    assert_stream_ended(&mut view_state, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_keep_latest_ends_when_a_producer_completes_without_emitting() -> anyhow::Result<()> {
    // Arrange
    let (user_tx, user) = test_channel();
    let (friends_tx, friends_stream) = test_channel();
    let mut view_state = aggregate([(USER, user), (FRIENDS, friends_stream)])?;
    user_tx.send(user_mark())?;

    // Act
    drop(friends_tx);

    // Assert
    assert_stream_ended(&mut view_state, 500).await;
    assert!(user_tx.send(user_marcus()).is_err());

    Ok(())
}

#[tokio::test]
async fn test_end_on_any_completion_ends_on_first_completion() -> anyhow::Result<()> {
    // Arrange
    let (user_tx, user) = test_channel();
    let (topics_tx, topics_stream) = test_channel();
    let mut view_state = Aggregation::new()
        .with_policy(CompletionPolicy::EndOnAnyCompletion)
        .role(USER, user)
        .role(TOPICS, topics_stream)
        .build()?;
    user_tx.send(user_mark())?;
    topics_tx.send(topics())?;
    unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Act
    drop(topics_tx);

    // Assert
    assert_stream_ended(&mut view_state, 500).await;
    assert!(user_tx.send(user_marcus()).is_err());

    Ok(())
}
