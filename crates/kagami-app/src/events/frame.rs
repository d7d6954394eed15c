use kagami_render::dispatch::Dispatcher;
use kagami_types::{ContainerKind, ViewCommand};
use kanal::AsyncSender;

use crate::transcript::TranscriptWriter;

/// Decode one wire frame, apply it, and fan the view delta out to the
/// presenter. Undecodable frames are logged and dropped; one bad frame
/// must never take the stream down.
pub async fn handle_frame(
    dispatcher: &mut Dispatcher,
    transcript: Option<&mut TranscriptWriter>,
    raw: &str,
    app_to_ui_tx: &AsyncSender<ViewCommand>,
) -> anyhow::Result<()> {
    let update = match dispatcher.dispatch(raw) {
        Ok(Some(update)) => update,
        Ok(None) => return Ok(()),
        Err(e) => {
            tracing::warn!("Dropping frame: {}", e);
            return Ok(());
        }
    };

    if update.container == ContainerKind::OutputTexts
        && let Some(writer) = transcript
        && let Err(e) = writer.append(raw)
    {
        tracing::error!("Transcript write failed: {}", e);
    }

    app_to_ui_tx.send(ViewCommand::Apply(update)).await?;

    Ok(())
}
