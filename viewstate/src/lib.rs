// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # viewstate
//!
//! Async view-state aggregation for presentation layers.
//!
//! ## Overview
//!
//! A view that depends on several asynchronous sources (a user, their topics, their
//! friends) would otherwise hold one subscription per source and juggle partial
//! state. `viewstate` merges named producers into one stream of [`CompositeValue`]s
//! and gives the presentation layer a single [`SubscriptionHandle`] to release on
//! teardown.
//!
//! - **Producers** are streams of [`StreamItem`]s, a [`Subject`] for imperatively fed
//!   values, or tokio channels via [`UnboundedReceiverExt::into_producer`].
//! - **Aggregation** ([`aggregate`], [`Aggregation`]) emits nothing until every role
//!   has a value, then one composite per producer emission.
//! - **Derivation** ([`DeriveExt`]) maps composites to form models or view models.
//! - **Subscription** ([`SubscribeViewExt::subscribe_view`]) drives the stream on a
//!   tokio task; [`SubscriptionHandle::release`] detaches from every producer.
//!
//! ## Quick Start
//!
//! ```rust
//! use viewstate::prelude::*;
//! use viewstate::Subject;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Profile {
//!     User(String),
//!     Friends(Vec<String>),
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> viewstate::Result<()> {
//! let user = Subject::new();
//! let friends = Subject::new();
//!
//! let handle = aggregate([("user", user.clone()), ("friends", friends.clone())])?
//!     .derive_with(|state| format!("{:?}", state.get("user")))
//!     .subscribe_view(
//!         |line| println!("{line:?}"),
//!         None::<fn(ViewStateError)>,
//!         None::<fn()>,
//!     );
//!
//! user.next(Profile::User("Mark".into()))?;
//! friends.next(Profile::Friends(vec!["Fred".into(), "Chuck".into()]))?;
//!
//! // Component teardown
//! handle.release();
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod receiver_ext;

// Re-export core types
pub use viewstate_core::{
    CancellationToken, Producer, Result, ResultExt, Role, StreamItem, Subject, ViewStateError,
};

// Re-export the aggregator
pub use viewstate_stream::{
    aggregate, aggregate_with, Aggregate, Aggregation, CompletionPolicy, CompositeValue,
    DeriveExt, Derived, ParseCompletionPolicyError,
};

// Re-export the presentation-layer contract
#[cfg(feature = "runtime-tokio")]
pub use viewstate_exec::SubscribeViewExt;
pub use viewstate_exec::SubscriptionHandle;

pub use receiver_ext::{ReceiverProducer, UnboundedReceiverExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::UnboundedReceiverExt;
    pub use viewstate_core::{Producer, StreamItem, ViewStateError};
    #[cfg(feature = "runtime-tokio")]
    pub use viewstate_exec::SubscribeViewExt;
    pub use viewstate_exec::SubscriptionHandle;
    pub use viewstate_stream::{
        aggregate, aggregate_with, Aggregation, CompletionPolicy, CompositeValue, DeriveExt,
    };
}
