use kagami_render::dispatch::Dispatcher;
use kagami_types::{ConnectionStatus, ViewCommand};
use kanal::AsyncSender;

/// Fold a connection status change into the status mount and forward
/// its display text to the presenter.
pub async fn handle_status(
    dispatcher: &mut Dispatcher,
    status: ConnectionStatus,
    app_to_ui_tx: &AsyncSender<ViewCommand>,
) -> anyhow::Result<()> {
    let text = status.to_string();
    dispatcher.state_mut().set_status(&text);
    app_to_ui_tx.send(ViewCommand::SetStatus(text)).await?;

    Ok(())
}
