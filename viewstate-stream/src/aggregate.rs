// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Merges named producers into one stream of [`CompositeValue`]s.
//!
//! The aggregation keeps the latest value of every role. Each value delivered by
//! any producer produces exactly one composite, as soon as every role has been
//! populated at least once; before that nothing is emitted.
//!
//! ```
//! use futures::{stream, StreamExt};
//! use viewstate_core::StreamItem;
//! use viewstate_stream::aggregate;
//!
//! # #[tokio::main]
//! # async fn main() -> viewstate_core::Result<()> {
//! let user = stream::iter(vec![StreamItem::Value("Mark")]);
//! let topics = stream::iter(vec![StreamItem::Value("rxjs")]);
//!
//! let mut view_state = aggregate([("user", user), ("topics", topics)])?;
//!
//! let composite = view_state.next().await.unwrap().unwrap();
//! assert_eq!(composite.get("user"), Some(&"Mark"));
//! assert_eq!(composite.get("topics"), Some(&"rxjs"));
//! assert!(view_state.next().await.is_none());
//! # Ok(())
//! # }
//! ```

use crate::snapshot::LatestSnapshot;
use crate::{CompletionPolicy, CompositeValue};
use futures::stream::FusedStream;
use futures::Stream;
use std::collections::HashSet;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use viewstate_core::{BoxProducerStream, Producer, Result, Role, StreamItem, ViewStateError};

/// Aggregates `(role, producer)` pairs with the default [`CompletionPolicy`].
///
/// # Errors
///
/// Returns `ViewStateError::EmptyAggregation` for an empty mapping and
/// `ViewStateError::DuplicateRole` when a role appears twice.
pub fn aggregate<V, I, R, P>(producers: I) -> Result<Aggregate<V>>
where
    I: IntoIterator<Item = (R, P)>,
    R: Into<Role>,
    P: Producer<Value = V>,
    V: Send + 'static,
{
    aggregate_with(CompletionPolicy::default(), producers)
}

/// Aggregates `(role, producer)` pairs with an explicit [`CompletionPolicy`].
///
/// # Errors
///
/// See [`aggregate`].
pub fn aggregate_with<V, I, R, P>(policy: CompletionPolicy, producers: I) -> Result<Aggregate<V>>
where
    I: IntoIterator<Item = (R, P)>,
    R: Into<Role>,
    P: Producer<Value = V>,
    V: Send + 'static,
{
    producers
        .into_iter()
        .fold(Aggregation::new().with_policy(policy), |aggregation, (role, producer)| {
            aggregation.role(role, producer)
        })
        .build()
}

/// Builder for an [`Aggregate`] whose producers may have different stream types.
///
/// Producers are attached when registered; dropping the builder detaches them.
///
/// ```
/// use futures::stream;
/// use viewstate_core::{StreamItem, Subject};
/// use viewstate_stream::{Aggregation, CompletionPolicy};
///
/// let user = Subject::new();
/// let topics = stream::iter(vec![StreamItem::Value(vec!["rxjs"])]);
///
/// let view_state = Aggregation::new()
///     .with_policy(CompletionPolicy::EndOnAnyCompletion)
///     .role("user", user.clone())
///     .role("topics", topics)
///     .build();
/// # let _: Result<viewstate_stream::Aggregate<Vec<&str>>, _> = view_state;
/// ```
pub struct Aggregation<V> {
    roles: Vec<Role>,
    producers: Vec<BoxProducerStream<V>>,
    policy: CompletionPolicy,
}

impl<V: Send + 'static> Aggregation<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: Vec::new(),
            producers: Vec::new(),
            policy: CompletionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers `producer` under `role` and attaches to it.
    #[must_use]
    pub fn role<P>(mut self, role: impl Into<Role>, producer: P) -> Self
    where
        P: Producer<Value = V>,
    {
        let role = role.into();
        trace!("attaching producer for role '{}'", role);
        self.roles.push(role);
        self.producers.push(producer.attach_boxed());
        self
    }

    /// Validates the registered roles and returns the aggregate stream.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError::EmptyAggregation` when no role was registered and
    /// `ViewStateError::DuplicateRole` when a role was registered twice.
    pub fn build(self) -> Result<Aggregate<V>> {
        if self.roles.is_empty() {
            return Err(ViewStateError::EmptyAggregation);
        }

        {
            let mut seen = HashSet::with_capacity(self.roles.len());
            if let Some(duplicate) = self.roles.iter().find(|role| !seen.insert(role.as_str())) {
                return Err(ViewStateError::duplicate_role(duplicate.as_str()));
            }
        }

        debug!(
            "aggregating {} roles with policy {}",
            self.roles.len(),
            self.policy
        );

        let count = self.producers.len();
        Ok(Aggregate {
            roles: self.roles.into(),
            producers: self.producers.into_iter().map(Some).collect(),
            snapshot: LatestSnapshot::new(count),
            policy: self.policy,
            next_start: 0,
            active: count,
            terminated: false,
        })
    }
}

impl<V: Send + 'static> Default for Aggregation<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Live aggregation: a stream of [`CompositeValue`]s over a fixed set of roles.
///
/// Producers are polled round-robin, starting after the one that delivered last,
/// so a busy producer can't starve the others. The snapshot is only touched from
/// `poll_next`, which serializes updates without a lock.
///
/// A producer error is yielded once and terminates the aggregate. Completion
/// follows the configured [`CompletionPolicy`]. [`release`](Self::release) detaches
/// from every producer immediately.
pub struct Aggregate<V> {
    roles: Arc<[Role]>,
    producers: Vec<Option<BoxProducerStream<V>>>,
    snapshot: LatestSnapshot<V>,
    policy: CompletionPolicy,
    next_start: usize,
    active: usize,
    terminated: bool,
}

// Producers are pinned boxes; no field is structurally pinned.
impl<V> Unpin for Aggregate<V> {}

impl<V> Aggregate<V> {
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Returns `true` until the first composite could be built.
    pub fn is_pending_population(&self) -> bool {
        !self.snapshot.is_complete()
    }

    /// Detaches from every producer and drops the buffered snapshot. Idempotent.
    ///
    /// The aggregate yields `None` afterwards.
    pub fn release(&mut self) {
        if self.terminated {
            return;
        }

        self.terminated = true;
        self.active = 0;
        self.producers.clear();
        self.snapshot.clear();
        trace!("aggregation over {} roles released", self.roles.len());
    }

    pub fn is_released(&self) -> bool {
        self.terminated
    }

    /// Marks producer `index` as completed and reports whether the aggregate must end.
    fn complete_producer(&mut self, index: usize) -> bool {
        self.producers[index] = None;
        self.active -= 1;
        debug!("producer for role '{}' completed", self.roles[index]);

        match self.policy {
            CompletionPolicy::EndOnAnyCompletion => true,
            CompletionPolicy::KeepLatest => self.active == 0 || !self.snapshot.has_value(index),
        }
    }
}

impl<V: Clone> Aggregate<V> {
    fn record(&mut self, index: usize, value: V) -> Option<CompositeValue<V>> {
        let was_complete = self.snapshot.is_complete();
        if !self.snapshot.has_value(index) {
            trace!("role '{}' populated", self.roles[index]);
        }

        self.snapshot.record(index, value);

        if !was_complete && self.snapshot.is_complete() {
            debug!("all {} roles populated, emitting composites", self.roles.len());
        }
        self.snapshot.composite(&self.roles)
    }
}

impl<V> Stream for Aggregate<V>
where
    V: Clone + Send + 'static,
{
    type Item = StreamItem<CompositeValue<V>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.terminated {
            return Poll::Ready(None);
        }

        let count = this.producers.len();
        let start = this.next_start;
        let mut absorbed = false;

        for offset in 0..count {
            let index = (start + offset) % count;
            let Some(producer) = this.producers[index].as_mut() else {
                continue;
            };

            match producer.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    this.next_start = (index + 1) % count;
                    if let Some(composite) = this.record(index, value) {
                        return Poll::Ready(Some(StreamItem::Value(composite)));
                    }
                    absorbed = true;
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    warn!(
                        "producer for role '{}' failed, terminating aggregation: {}",
                        this.roles[index], error
                    );
                    this.release();
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                Poll::Ready(None) => {
                    if this.complete_producer(index) {
                        this.release();
                        return Poll::Ready(None);
                    }
                }
                Poll::Pending => {}
            }
        }

        // A producer that just delivered has no waker registered. Yield after one pass
        // instead of looping, so an always-ready producer can't monopolize the executor.
        if absorbed {
            cx.waker().wake_by_ref();
        }

        Poll::Pending
    }
}

impl<V> FusedStream for Aggregate<V>
where
    V: Clone + Send + 'static,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<V> fmt::Debug for Aggregate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("roles", &self.roles)
            .field("policy", &self.policy)
            .field("active", &self.active)
            .field("populated", &self.snapshot.is_complete())
            .field("terminated", &self.terminated)
            .finish()
    }
}
