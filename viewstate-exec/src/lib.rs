// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Presentation-layer subscriptions for view-state streams.
//!
//! [`SubscribeViewExt::subscribe_view`] drives a stream of [`StreamItem`]s on a
//! background task and hands each value to a callback. The returned
//! [`SubscriptionHandle`] is the single thing a component keeps: releasing it (or
//! dropping it) detaches from every producer behind the stream.
//!
//! [`StreamItem`]: viewstate_core::StreamItem

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

#[cfg(feature = "runtime-tokio")]
mod delivery;
pub mod handle;
#[cfg(feature = "runtime-tokio")]
pub mod subscribe_view;

pub use self::handle::SubscriptionHandle;
#[cfg(feature = "runtime-tokio")]
pub use self::subscribe_view::SubscribeViewExt;
