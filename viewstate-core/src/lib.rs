// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by the view-state crates.
//!
//! - [`StreamItem`]: a value or a fatal error travelling through a stream
//! - [`ViewStateError`]: the single error type of the workspace
//! - [`Role`] and [`Producer`]: how sources are named and attached
//! - [`Subject`]: a hot, imperatively-fed producer
//! - [`CancellationToken`]: runtime-agnostic cancellation for delivery tasks

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod cancellation_token;
pub mod error;
pub mod producer;
pub mod role;
pub mod stream_item;
pub mod subject;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{IntoViewStateError, Result, ResultExt, ViewStateError};
pub use self::producer::{BoxProducerStream, Producer};
pub use self::role::Role;
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
