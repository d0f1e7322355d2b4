// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

/// What an aggregation does when one of its producers completes normally.
///
/// Errors are not affected by the policy: a producer error always terminates the
/// aggregation.
///
/// ```
/// use viewstate_stream::CompletionPolicy;
///
/// let policy: CompletionPolicy = "end-on-any".parse().unwrap();
/// assert_eq!(policy, CompletionPolicy::EndOnAnyCompletion);
/// assert_eq!(CompletionPolicy::default().to_string(), "keep-latest");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionPolicy {
    /// The aggregation completes as soon as any producer completes.
    #[cfg_attr(feature = "serde", serde(rename = "end-on-any"))]
    EndOnAnyCompletion,

    /// A completed producer keeps its last value in later composites.
    ///
    /// The aggregation completes once every producer has completed, or right away
    /// if a producer completes without ever emitting.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "keep-latest"))]
    KeepLatest,
}

impl CompletionPolicy {
    const END_ON_ANY: &'static str = "end-on-any";
    const KEEP_LATEST: &'static str = "keep-latest";
}

impl Display for CompletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOnAnyCompletion => f.write_str(Self::END_ON_ANY),
            Self::KeepLatest => f.write_str(Self::KEEP_LATEST),
        }
    }
}

/// Returned when a string names no known [`CompletionPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown completion policy '{0}', expected 'end-on-any' or 'keep-latest'")]
pub struct ParseCompletionPolicyError(String);

impl FromStr for CompletionPolicy {
    type Err = ParseCompletionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            Self::END_ON_ANY => Ok(Self::EndOnAnyCompletion),
            Self::KEEP_LATEST => Ok(Self::KeepLatest),
            _ => Err(ParseCompletionPolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            " Keep-Latest ".parse::<CompletionPolicy>(),
            Ok(CompletionPolicy::KeepLatest)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "first-wins".parse::<CompletionPolicy>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "unknown completion policy 'first-wins', expected 'end-on-any' or 'keep-latest'"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for policy in [CompletionPolicy::EndOnAnyCompletion, CompletionPolicy::KeepLatest] {
            assert_eq!(policy.to_string().parse::<CompletionPolicy>(), Ok(policy));
        }
    }
}
