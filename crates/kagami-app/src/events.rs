use std::sync::Arc;

use kagami_render::dispatch::Dispatcher;
use kagami_render::state::RenderState;
use kagami_types::{AppEvent, ViewCommand};
use kanal::{AsyncReceiver, AsyncSender};

use crate::state::AppState;
use crate::templates::TextTemplates;
use crate::transcript::TranscriptWriter;

pub mod frame;
pub mod status;

use frame::handle_frame;
use status::handle_status;

/// App's main loop. Every mutation of the render state happens here,
/// one event at a time, which is what makes replayed and live frames
/// interchangeable.
pub async fn event_loop(
    state: Arc<AppState>,
    io_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<ViewCommand>,
) -> anyhow::Result<()> {
    let mut transcript = {
        let config = state.config.read().await;
        config
            .transcript_dir
            .as_ref()
            .map(|dir| TranscriptWriter::new(dir.clone()))
    };

    let mut dispatcher = Dispatcher::new(RenderState::new(Box::new(TextTemplates)));

    tracing::info!("Event loop started, waiting for events");
    loop {
        let event = io_to_app_rx.recv().await?;

        match event {
            AppEvent::Frame(raw) => {
                handle_frame(&mut dispatcher, transcript.as_mut(), &raw, &app_to_ui_tx).await?;
            }
            AppEvent::Status(status) => {
                handle_status(&mut dispatcher, status, &app_to_ui_tx).await?;
            }
        }
    }
}
