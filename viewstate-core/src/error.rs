// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for view-state aggregation
//!
//! [`ViewStateError`] is the root error of the workspace. Producer failures travel
//! through streams as [`StreamItem::Error`](crate::StreamItem::Error); construction
//! and lookup mistakes are returned directly as [`Result`].
//!
//! # Examples
//!
//! ```
//! use viewstate_core::{Result, ViewStateError};
//!
//! fn load_user() -> Result<()> {
//!     Err(ViewStateError::producer_failure("user service unavailable"))
//! }
//!
//! assert!(load_user().unwrap_err().is_producer_failure());
//! ```

/// Root error type for all view-state operations
#[derive(Debug, thiserror::Error)]
pub enum ViewStateError {
    /// A producer signalled a fatal error.
    ///
    /// Aggregation forwards this error unmodified and then terminates.
    #[error("Producer failure: {context}")]
    ProducerFailure {
        /// Description of what went wrong inside the producer
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by user-provided producers, derive functions and callbacks.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An aggregation was built without any producer
    #[error("Aggregation requires at least one producer")]
    EmptyAggregation,

    /// The same role was registered twice in one aggregation
    #[error("Role '{role}' is registered more than once")]
    DuplicateRole {
        /// The offending role name
        role: String,
    },

    /// A composite value was asked for a role it does not carry
    #[error("Role '{role}' is not part of this composite value")]
    UnknownRole {
        /// The missing role name
        role: String,
    },

    /// A value was pushed into a subject that has already been closed
    #[error("Subject is closed")]
    SubjectClosed,
}

impl ViewStateError {
    /// Create a producer failure with the given context
    pub fn producer_failure(context: impl Into<String>) -> Self {
        Self::ProducerFailure {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    pub fn duplicate_role(role: impl Into<String>) -> Self {
        Self::DuplicateRole { role: role.into() }
    }

    pub fn unknown_role(role: impl Into<String>) -> Self {
        Self::UnknownRole { role: role.into() }
    }

    /// Returns `true` for errors raised by a producer (including wrapped user errors).
    #[must_use]
    pub const fn is_producer_failure(&self) -> bool {
        matches!(self, Self::ProducerFailure { .. } | Self::UserError(_))
    }

    /// Returns `true` for errors caused by how the API was called, not by a producer.
    #[must_use]
    pub const fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::EmptyAggregation
                | Self::DuplicateRole { .. }
                | Self::UnknownRole { .. }
                | Self::SubjectClosed
        )
    }
}

/// Specialized Result type for view-state operations
pub type Result<T> = std::result::Result<T, ViewStateError>;

/// Extension trait for converting foreign errors into `ViewStateError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoViewStateError {
    /// Convert this error into a `ViewStateError`
    fn into_view_state_error(self) -> ViewStateError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoViewStateError for E {
    fn into_view_state_error(self) -> ViewStateError {
        ViewStateError::user_error(self)
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(ViewStateError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(ViewStateError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ViewStateError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            ViewStateError::UserError(inner) => ViewStateError::ProducerFailure {
                context: format!("{}: {inner}", f()),
            },
            ViewStateError::ProducerFailure { context } => ViewStateError::ProducerFailure {
                context: format!("{}: {context}", f()),
            },
            other => other,
        })
    }
}

impl Clone for ViewStateError {
    fn clone(&self) -> Self {
        match self {
            Self::ProducerFailure { context } => Self::ProducerFailure {
                context: context.clone(),
            },
            // Boxed user errors can't be cloned, keep their message
            Self::UserError(e) => Self::ProducerFailure {
                context: format!("User error: {e}"),
            },
            Self::EmptyAggregation => Self::EmptyAggregation,
            Self::DuplicateRole { role } => Self::DuplicateRole { role: role.clone() },
            Self::UnknownRole { role } => Self::UnknownRole { role: role.clone() },
            Self::SubjectClosed => Self::SubjectClosed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn context_rewrites_user_errors_as_producer_failures() {
        let result: std::result::Result<(), ViewStateError> = Err(DiskError.into_view_state_error());

        let err = result.context("loading topics").unwrap_err();

        assert!(matches!(
            err,
            ViewStateError::ProducerFailure { ref context } if context == "loading topics: disk on fire"
        ));
    }

    #[test]
    fn context_leaves_misuse_errors_alone() {
        let result: Result<()> = Err(ViewStateError::EmptyAggregation);

        let err = result.context("building view").unwrap_err();

        assert!(matches!(err, ViewStateError::EmptyAggregation));
        assert!(err.is_misuse());
    }

    #[test]
    fn cloning_a_user_error_keeps_its_message() {
        let err = ViewStateError::user_error(DiskError);

        let cloned = err.clone();

        assert!(cloned.is_producer_failure());
        assert_eq!(cloned.to_string(), "Producer failure: User error: disk on fire");
    }
}
