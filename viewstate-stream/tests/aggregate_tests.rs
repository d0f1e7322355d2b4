// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use viewstate_core::{Role, StreamItem, Subject, ViewStateError};
use viewstate_stream::{aggregate, Aggregate, Aggregation, CompositeValue};
use viewstate_test_utils::profile::{
    friends, friends_with_alice, topics, user_marcus, user_mark, FRIENDS, TOPICS, USER,
};
use viewstate_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, unwrap_value,
    ProfileData,
};

struct ProfileSenders {
    user: UnboundedSender<ProfileData>,
    topics: UnboundedSender<ProfileData>,
    friends: UnboundedSender<ProfileData>,
}

fn profile_aggregation() -> anyhow::Result<(ProfileSenders, Aggregate<ProfileData>)> {
    let (user_tx, user) = test_channel();
    let (topics_tx, topics) = test_channel();
    let (friends_tx, friends) = test_channel();

    let view_state = aggregate([(USER, user), (TOPICS, topics), (FRIENDS, friends)])?;

    Ok((
        ProfileSenders {
            user: user_tx,
            topics: topics_tx,
            friends: friends_tx,
        },
        view_state,
    ))
}

fn expected_profile(user: ProfileData, friends: ProfileData) -> CompositeValue<ProfileData> {
    CompositeValue::new(vec![
        (Role::from(USER), user),
        (Role::from(TOPICS), topics()),
        (Role::from(FRIENDS), friends),
    ])
}

#[tokio::test]
async fn test_aggregate_not_all_roles_populated_does_not_emit() -> anyhow::Result<()> {
    // Arrange
    let (senders, mut view_state) = profile_aggregation()?;

    // Act
    senders.user.send(user_mark())?;
    senders.topics.send(topics())?;

    // Assert
    assert_no_element_emitted(&mut view_state, 100).await;
    assert!(view_state.is_pending_population());

    Ok(())
}

#[tokio::test]
async fn test_aggregate_profile_emits_exactly_one_composite() -> anyhow::Result<()> {
    // Arrange
    let (senders, mut view_state) = profile_aggregation()?;

    // Act
    senders.friends.send(friends())?;
    senders.user.send(user_mark())?;
    senders.topics.send(topics())?;

    // Assert
    let composite = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    assert_eq!(composite, expected_profile(user_mark(), friends()));
    assert_eq!(composite.require(TOPICS)?.as_topics().map(<[_]>::len), Some(6));
    assert_eq!(composite.require(FRIENDS)?.as_friends().map(<[_]>::len), Some(2));
    assert_no_element_emitted(&mut view_state, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_aggregate_user_update_keeps_other_roles() -> anyhow::Result<()> {
    // Arrange
    let (senders, mut view_state) = profile_aggregation()?;
    senders.user.send(user_mark())?;
    senders.topics.send(topics())?;
    senders.friends.send(friends())?;
    let first = unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Act
    senders.user.send(user_marcus())?;

    // Assert
    let second = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    assert_eq!(second, expected_profile(user_marcus(), friends()));
    assert_eq!(second.get(TOPICS), first.get(TOPICS));
    assert_eq!(second.get(FRIENDS), first.get(FRIENDS));
    assert_eq!(first.get(USER), Some(&user_mark()));

    Ok(())
}

#[tokio::test]
async fn test_aggregate_emits_once_per_emission_after_population() -> anyhow::Result<()> {
    // Arrange
    let (senders, mut view_state) = profile_aggregation()?;
    senders.user.send(user_mark())?;
    senders.topics.send(topics())?;
    senders.friends.send(friends())?;
    unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Act
    senders.friends.send(friends_with_alice())?;
    let first = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    senders.user.send(user_marcus())?;
    let second = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    senders.user.send(user_mark())?;
    let third = unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Assert
    assert_eq!(first, expected_profile(user_mark(), friends_with_alice()));
    assert_eq!(second, expected_profile(user_marcus(), friends_with_alice()));
    assert_eq!(third, expected_profile(user_mark(), friends_with_alice()));
    assert_no_element_emitted(&mut view_state, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_aggregate_single_role() -> anyhow::Result<()> {
    // Arrange
    let (tx, user) = test_channel();
    let mut view_state = aggregate([(USER, user)])?;

    // Act
    tx.send(user_mark())?;

    // Assert
    let composite = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    assert_eq!(composite.len(), 1);
    assert_eq!(composite.get(USER), Some(&user_mark()));

    Ok(())
}

#[tokio::test]
async fn test_aggregate_release_stops_emissions() -> anyhow::Result<()> {
    // Arrange
    let (senders, mut view_state) = profile_aggregation()?;
    senders.user.send(user_mark())?;
    senders.topics.send(topics())?;
    senders.friends.send(friends())?;
    unwrap_value(unwrap_stream(&mut view_state, 500).await);

    // Act
    view_state.release();
    view_state.release();

    // Assert
    assert!(view_state.is_released());
    assert!(senders.user.send(user_marcus()).is_err());
    assert_stream_ended(&mut view_state, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_aggregate_release_detaches_from_subjects() -> anyhow::Result<()> {
    // Arrange
    let user = Subject::new();
    let topics_subject = Subject::new();
    let mut view_state = aggregate([(USER, user.clone()), (TOPICS, topics_subject.clone())])?;
    assert_eq!(user.subscriber_count(), 1);

    // Act
    view_state.release();
    user.next(user_mark())?;
    topics_subject.next(topics())?;

    // Assert
    assert_eq!(user.subscriber_count(), 0);
    assert_eq!(topics_subject.subscriber_count(), 0);
    assert_stream_ended(&mut view_state, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_aggregate_rejects_empty_mapping() {
    // Arrange
    let producers: Vec<(&str, stream::Empty<StreamItem<ProfileData>>)> = Vec::new();

    // Act
    let result = aggregate(producers);

    // Assert
    assert!(matches!(result, Err(ViewStateError::EmptyAggregation)));
}

#[tokio::test]
async fn test_aggregate_rejects_duplicate_roles() {
    // Arrange
    let (_user_tx, user) = test_channel::<ProfileData>();
    let (_other_tx, other) = test_channel::<ProfileData>();

    // Act
    let result = aggregate([(USER, user), (USER, other)]);

    // Assert
    assert!(matches!(
        result,
        Err(ViewStateError::DuplicateRole { ref role }) if role == USER
    ));
}

#[tokio::test]
async fn test_aggregate_accepts_a_map_of_producers() -> anyhow::Result<()> {
    // Arrange
    let mut producers = BTreeMap::new();
    producers.insert(USER, stream::iter(vec![StreamItem::Value(user_mark())]));
    producers.insert(TOPICS, stream::iter(vec![StreamItem::Value(topics())]));

    // Act
    let mut view_state = aggregate(producers)?;

    // Assert
    let composite = unwrap_value(unwrap_stream(&mut view_state, 500).await);
    let roles: Vec<&str> = composite.roles().map(Role::as_str).collect();
    assert_eq!(roles, vec![TOPICS, USER]);
    assert_stream_ended(&mut view_state, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_aggregate_busy_producer_does_not_starve_others() -> anyhow::Result<()> {
    // Arrange
    let busy = stream::repeat(StreamItem::Value(1)).boxed();
    let quiet = stream::iter(vec![StreamItem::Value(10), StreamItem::Value(20)])
        .chain(stream::pending())
        .boxed();
    let view_state = aggregate([("busy", busy), ("quiet", quiet)])?;

    // Act
    let quiet_values: Vec<i32> = view_state
        .take(4)
        .map(|item| *unwrap_value(item).get("quiet").unwrap())
        .collect()
        .await;

    // Assert
    assert!(quiet_values.contains(&20), "quiet producer starved: {quiet_values:?}");

    Ok(())
}

#[tokio::test]
async fn test_aggregate_quiet_middle_producer_is_polled() -> anyhow::Result<()> {
    // Arrange
    let view_state = aggregate([
        ("a", stream::repeat(StreamItem::Value(1)).boxed()),
        (
            "b",
            stream::iter(vec![StreamItem::Value(10), StreamItem::Value(20)])
                .chain(stream::pending())
                .boxed(),
        ),
        ("c", stream::repeat(StreamItem::Value(100)).boxed()),
    ])?;

    // Act
    let middle_values: Vec<i32> = view_state
        .take(4)
        .map(|item| *unwrap_value(item).get("b").unwrap())
        .collect()
        .await;

    // Assert
    assert_eq!(middle_values[0], 10);
    assert!(middle_values.contains(&20), "middle producer starved: {middle_values:?}");

    Ok(())
}

#[tokio::test]
async fn test_aggregate_always_ready_producer_yields_to_timers() -> anyhow::Result<()> {
    // Arrange
    let (timed_tx, timed) = test_channel();
    let mut view_state = Aggregation::new()
        .role("busy", stream::repeat(StreamItem::Value(0)))
        .role("timed", timed)
        .build()?;

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let _ = timed_tx.send(7);
    });

    // Act
    let composite = unwrap_value(unwrap_stream(&mut view_state, 1000).await);

    // Assert
    assert_eq!(composite.get("timed"), Some(&7));
    assert_eq!(composite.get("busy"), Some(&0));

    Ok(())
}
