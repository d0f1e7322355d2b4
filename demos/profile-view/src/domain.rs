// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Profile domain types

use serde::Serialize;

pub const USER: &str = "user";
pub const TOPICS: &str = "topics";
pub const FRIENDS: &str = "friends";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friend {
    pub id: u32,
    pub name: String,
}

/// Payload of every role in the profile aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProfileData {
    User(User),
    Topics(Vec<Topic>),
    Friends(Vec<Friend>),
}
