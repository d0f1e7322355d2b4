// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Mock data service.
//!
//! The factory functions are stateless: every call returns a fresh producer that
//! emits once after a short simulated latency and then completes. The user record is
//! the only mutable piece of data and lives in a [`UserStore`].

use crate::domain::{Friend, ProfileData, Topic, User};
use async_stream::stream;
use futures::stream::{iter, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use viewstate::{Producer, StreamItem, Subject};

const LATENCY: Duration = Duration::from_millis(20);

pub fn user() -> impl Producer<Value = ProfileData> {
    delayed(ProfileData::User(initial_user()))
}

pub fn topics() -> impl Producer<Value = ProfileData> {
    let names = ["rxjs", "angular", "typescript", "ngrx", "forms", "testing"];
    let topics = (1..)
        .zip(names)
        .map(|(id, name)| Topic {
            id,
            name: name.to_string(),
        })
        .collect();
    delayed(ProfileData::Topics(topics))
}

pub fn friends() -> impl Producer<Value = ProfileData> {
    delayed(ProfileData::Friends(vec![
        Friend {
            id: 2,
            name: "Fred".to_string(),
        },
        Friend {
            id: 3,
            name: "Chuck".to_string(),
        },
    ]))
}

fn initial_user() -> User {
    User {
        id: 1,
        name: "Mark".to_string(),
    }
}

fn delayed(value: ProfileData) -> impl Producer<Value = ProfileData> {
    stream! {
        sleep(LATENCY).await;
        yield StreamItem::Value(value);
    }
}

/// Mutable user record; every producer handed out sees the current user first and
/// every later rename.
#[derive(Clone)]
pub struct UserStore {
    current: Arc<Mutex<User>>,
    updates: Subject<ProfileData>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(initial_user())),
            updates: Subject::new(),
        }
    }

    pub fn user(&self) -> impl Producer<Value = ProfileData> {
        // Held across subscribe so no rename falls between snapshot and updates.
        let current = self.current.lock();
        let updates = self.updates.clone().attach();
        let snapshot = StreamItem::Value(ProfileData::User(current.clone()));

        iter([snapshot]).chain(updates)
    }

    pub fn rename(&self, name: &str) -> viewstate::Result<()> {
        let mut current = self.current.lock();
        current.name = name.to_string();
        tracing::info!(id = current.id, name, "user renamed");
        self.updates.next(ProfileData::User(current.clone()))
    }

    pub fn close(&self) {
        self.updates.close();
    }

    pub fn subscriber_count(&self) -> usize {
        self.updates.subscriber_count()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_stateless_factories_emit_once_and_complete() {
        // Arrange
        let mut topics = Box::pin(topics().attach());

        // Act
        let first = topics.next().await;
        let second = topics.next().await;

        // Assert
        assert!(matches!(
            first,
            Some(StreamItem::Value(ProfileData::Topics(ref list))) if list.len() == 6
        ));
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_user_store_replays_current_user_and_renames() {
        // Arrange
        let store = UserStore::new();
        store.rename("Marcus").unwrap();
        let mut user = Box::pin(store.user().attach());

        // Act
        let current = user.next().await.unwrap().unwrap();
        store.rename("Mark").unwrap();
        let renamed = user.next().await.unwrap().unwrap();

        // Assert
        assert_eq!(
            current,
            ProfileData::User(User {
                id: 1,
                name: "Marcus".to_string()
            })
        );
        assert_eq!(
            renamed,
            ProfileData::User(User {
                id: 1,
                name: "Mark".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_user_store_close_completes_producers() {
        // Arrange
        let store = UserStore::new();
        let mut user = Box::pin(store.user().attach());
        user.next().await;

        // Act
        store.close();

        // Assert
        assert!(user.next().await.is_none());
    }
}
