// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The profile view component.
//!
//! Mounting aggregates the user, topics and friends producers, derives a
//! [`ProfileForm`] from each composite and renders it. Destroying the component
//! releases the single subscription it holds.

use crate::config::DemoConfig;
use crate::data_service::{self, UserStore};
use crate::domain::{ProfileData, FRIENDS, TOPICS, USER};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info};
use viewstate::prelude::*;

/// A role held a `ProfileData` variant other than the one the form expects.
#[derive(Debug, thiserror::Error)]
#[error("role '{role}' carries an unexpected payload")]
pub struct UnexpectedPayload {
    pub role: &'static str,
}

/// Form model backing the profile editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileForm {
    pub name: String,
    pub topics: Vec<String>,
    pub friends: Vec<String>,
}

impl ProfileForm {
    pub fn from_view_state(state: &CompositeValue<ProfileData>) -> viewstate::Result<Self> {
        let ProfileData::User(user) = state.require(USER)? else {
            return Err(ViewStateError::user_error(UnexpectedPayload { role: USER }));
        };
        let ProfileData::Topics(topics) = state.require(TOPICS)? else {
            return Err(ViewStateError::user_error(UnexpectedPayload { role: TOPICS }));
        };
        let ProfileData::Friends(friends) = state.require(FRIENDS)? else {
            return Err(ViewStateError::user_error(UnexpectedPayload { role: FRIENDS }));
        };

        Ok(Self {
            name: user.name.clone(),
            topics: topics.iter().map(|topic| topic.name.clone()).collect(),
            friends: friends.iter().map(|friend| friend.name.clone()).collect(),
        })
    }
}

/// What the view renders for one composite.
#[derive(Debug, Clone, Serialize)]
pub struct Rendered {
    pub form: ProfileForm,
    pub view_state: CompositeValue<ProfileData>,
}

pub struct ProfileView {
    handle: SubscriptionHandle,
    renders: mpsc::UnboundedReceiver<ProfileForm>,
}

impl ProfileView {
    /// Subscribes the view to its producers.
    pub fn mount(config: &DemoConfig, store: &UserStore) -> anyhow::Result<Self> {
        let (render_tx, renders) = mpsc::unbounded_channel();

        let handle = Aggregation::new()
            .with_policy(config.completion)
            .role(USER, store.user())
            .role(TOPICS, data_service::topics())
            .role(FRIENDS, data_service::friends())
            .build()?
            .try_derive_with(|state| {
                Ok(Rendered {
                    form: ProfileForm::from_view_state(state)?,
                    view_state: state.clone(),
                })
            })
            .subscribe_view(
                move |rendered: Rendered| {
                    render(&rendered);
                    let _ = render_tx.send(rendered.form);
                },
                Some(|error: ViewStateError| error!(%error, "profile view failed")),
                Some(|| info!("profile view producers completed")),
            );

        info!(policy = %config.completion, "profile view mounted");
        Ok(Self { handle, renders })
    }

    /// Waits for the next rendered form; `None` once the view stops rendering.
    pub async fn next_render(&mut self) -> Option<ProfileForm> {
        self.renders.recv().await
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_released() && !self.handle.is_finished()
    }

    /// Releases the subscription.
    pub fn destroy(self) {
        self.handle.release();
        info!("profile view destroyed");
    }
}

fn render(rendered: &Rendered) {
    match serde_json::to_string(rendered) {
        Ok(json) => info!(view = %json, "render"),
        Err(error) => error!(%error, "failed to render profile view"),
    }
}
