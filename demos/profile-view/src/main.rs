// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Profile view - async view-state aggregation end to end
//!
//! This demo:
//! - Mounts a profile view over three producers (user, topics, friends)
//! - Renders one view state once every producer has delivered
//! - Renames the user and renders the updated view state
//! - Destroys the view, releasing every producer at once
//!
//! Configuration:
//! - `PROFILE_VIEW_COMPLETION`: `keep-latest` (default) or `end-on-any`
//! - `PROFILE_VIEW_RENAME_DELAY_MS`: delay before the rename (default 200)
//! - `RUST_LOG`: log filter (default `info`)
//!
//! Run with: `cargo run -p profile-view-demo`

mod config;
mod data_service;
mod domain;
mod profile_view;

use crate::config::DemoConfig;
use crate::data_service::UserStore;
use crate::profile_view::ProfileView;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DemoConfig::from_env()?;
    info!(?config, "starting profile view demo");

    let store = UserStore::new();
    let mut view = ProfileView::mount(&config, &store)?;

    match view.next_render().await {
        Some(form) => info!(name = %form.name, topics = form.topics.len(), "initial profile rendered"),
        None => warn!("profile view ended before rendering"),
    }

    sleep(config.rename_delay).await;
    store.rename("Marcus")?;

    if view.is_active() {
        if let Some(form) = view.next_render().await {
            info!(name = %form.name, "renamed profile rendered");
        }
    } else {
        warn!(policy = %config.completion, "profile view no longer active, rename not rendered");
    }

    view.destroy();
    store.close();
    info!(subscribers = store.subscriber_count(), "profile view demo finished");

    Ok(())
}
