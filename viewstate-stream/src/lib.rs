// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! View-state aggregation over named asynchronous producers.
//!
//! A view usually needs several independent sources (the current user, their topics,
//! their friends) before it can render. This crate merges those sources into a single
//! stream of [`CompositeValue`]s so the presentation layer manages one subscription
//! instead of one per source.
//!
//! # Semantics
//!
//! - **No partial records**: nothing is emitted until every role has produced a value.
//! - **One composite per delivery**: afterwards, every value from any producer yields a
//!   new composite carrying the latest value of every role.
//! - **Ordered**: composites follow the order in which producer values are delivered.
//! - **Fatal errors**: a producer error is forwarded unmodified and ends the aggregation.
//! - **Configurable completion**: see [`CompletionPolicy`].
//! - **Release**: [`Aggregate::release`] detaches from every producer at once.
//!
//! # Example
//!
//! ```
//! use futures::{stream, StreamExt};
//! use viewstate_core::{StreamItem, Subject};
//! use viewstate_stream::{Aggregation, DeriveExt};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Profile {
//!     User(String),
//!     Topics(Vec<String>),
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> viewstate_core::Result<()> {
//! let user = Subject::new();
//! let topics = stream::iter(vec![StreamItem::Value(Profile::Topics(vec!["rxjs".into()]))]);
//!
//! let mut headlines = Aggregation::new()
//!     .role("user", user.clone())
//!     .role("topics", topics)
//!     .build()?
//!     .derive_with(|state| match (state.get("user"), state.get("topics")) {
//!         (Some(Profile::User(name)), Some(Profile::Topics(topics))) => {
//!             format!("{name} follows {}", topics.join(", "))
//!         }
//!         _ => String::new(),
//!     });
//!
//! user.next(Profile::User("Mark".into()))?;
//! assert_eq!(headlines.next().await.unwrap().unwrap(), "Mark follows rxjs");
//!
//! user.next(Profile::User("Marcus".into()))?;
//! assert_eq!(headlines.next().await.unwrap().unwrap(), "Marcus follows rxjs");
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod aggregate;
pub mod composite;
pub mod derive;
pub mod policy;
mod snapshot;

pub use self::aggregate::{aggregate, aggregate_with, Aggregate, Aggregation};
pub use self::composite::CompositeValue;
pub use self::derive::{DeriveExt, Derived};
pub use self::policy::{CompletionPolicy, ParseCompletionPolicyError};
