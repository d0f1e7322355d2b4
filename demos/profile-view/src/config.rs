// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use std::env;
use tokio::time::Duration;
use viewstate::CompletionPolicy;

pub const COMPLETION_VAR: &str = "PROFILE_VIEW_COMPLETION";
pub const RENAME_DELAY_VAR: &str = "PROFILE_VIEW_RENAME_DELAY_MS";

const DEFAULT_RENAME_DELAY: Duration = Duration::from_millis(200);

/// Demo settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub completion: CompletionPolicy,
    pub rename_delay: Duration,
}

impl DemoConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let completion = match lookup(COMPLETION_VAR) {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid {COMPLETION_VAR}"))?,
            None => CompletionPolicy::default(),
        };

        let rename_delay = match lookup(RENAME_DELAY_VAR) {
            Some(value) => Duration::from_millis(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid {RENAME_DELAY_VAR}: '{value}'"))?,
            ),
            None => DEFAULT_RENAME_DELAY,
        };

        Ok(Self {
            completion,
            rename_delay,
        })
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            completion: CompletionPolicy::default(),
            rename_delay: DEFAULT_RENAME_DELAY,
        }
    }
}
