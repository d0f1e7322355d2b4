// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Profile view fixtures: one user, six topics, two friends.

use std::fmt::{self, Display};

pub const USER: &str = "user";
pub const TOPICS: &str = "topics";
pub const FRIENDS: &str = "friends";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Friend {
    pub id: u32,
    pub name: String,
}

/// One value type for all three roles of the profile aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileData {
    User(User),
    Topics(Vec<Topic>),
    Friends(Vec<Friend>),
}

impl ProfileData {
    #[must_use]
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_topics(&self) -> Option<&[Topic]> {
        match self {
            Self::Topics(topics) => Some(topics),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_friends(&self) -> Option<&[Friend]> {
        match self {
            Self::Friends(friends) => Some(friends),
            _ => None,
        }
    }
}

impl Display for ProfileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user) => write!(f, "User[id={}, name={}]", user.id, user.name),
            Self::Topics(topics) => write!(f, "Topics[{}]", topics.len()),
            Self::Friends(friends) => write!(f, "Friends[{}]", friends.len()),
        }
    }
}

fn user(id: u32, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

#[must_use]
pub fn user_mark() -> ProfileData {
    ProfileData::User(user(1, "Mark"))
}

#[must_use]
pub fn user_marcus() -> ProfileData {
    ProfileData::User(user(1, "Marcus"))
}

#[must_use]
pub fn topics() -> ProfileData {
    let names = ["rxjs", "angular", "typescript", "ngrx", "forms", "testing"];
    ProfileData::Topics(
        (1..)
            .zip(names)
            .map(|(id, name)| Topic {
                id,
                name: name.to_string(),
            })
            .collect(),
    )
}

#[must_use]
pub fn friends() -> ProfileData {
    ProfileData::Friends(vec![
        Friend {
            id: 2,
            name: "Fred".to_string(),
        },
        Friend {
            id: 3,
            name: "Chuck".to_string(),
        },
    ])
}

#[must_use]
pub fn friends_with_alice() -> ProfileData {
    let ProfileData::Friends(mut list) = friends() else {
        unreachable!("friends() always returns ProfileData::Friends")
    };
    list.push(Friend {
        id: 4,
        name: "Alice".to_string(),
    });
    ProfileData::Friends(list)
}
