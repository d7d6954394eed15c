use std::sync::Arc;

use kagami_types::{AppEvent, ViewCommand};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub io_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_ui: (AsyncSender<ViewCommand>, AsyncReceiver<ViewCommand>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            io_to_app: kanal::bounded_async(256), // snapshot replay burst capacity
            app_to_ui: kanal::bounded_async(256), // one command per applied event
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, events_url: String, recent_url: String) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.io_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Presenter
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.config.clone(),
            self.cancel_token.child_token(),
        ));

        // Live event stream
        tasks.spawn(kagami_client::ws::run_connection(
            events_url,
            self.channels.io_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        // One-shot bootstrap snapshot. Detached on purpose: finishing
        // is normal and must not look like a dead worker to main.
        let snapshot_tx = self.channels.io_to_app.0.clone();
        let cancel = self.cancel_token.child_token();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = replay_snapshot(recent_url, snapshot_tx) => {}
            }
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

async fn replay_snapshot(recent_url: String, event_tx: AsyncSender<AppEvent>) {
    let client = reqwest::Client::new();
    match kagami_client::snapshot::load_recent(&client, &recent_url, &event_tx).await {
        Ok(count) => tracing::info!("Replayed {} recent events", count),
        Err(e) => tracing::error!("Recent-events snapshot failed: {}", e),
    }
}
