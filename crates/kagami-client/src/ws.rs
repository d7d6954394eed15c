use std::time::Duration;

use futures_util::StreamExt;
use kagami_types::AppEvent;
use kanal::AsyncSender;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::machine::Connection;

/// Drive the live event stream forever: connect, forward text frames,
/// and reconnect with linear backoff after every failure or close.
/// Returns only on cancellation or when the app side hangs up.
pub async fn run_connection(
    url: String,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut conn = Connection::new();

    loop {
        if cancel.is_cancelled() {
            return Ok(());
        }

        conn.begin_connect();
        push_status(&event_tx, &conn).await?;

        let mut delay = None;

        match connect_async(url.as_str()).await {
            Ok((ws_stream, _)) => {
                conn.record_open();
                push_status(&event_tx, &conn).await?;
                tracing::info!("Event stream connected: {}", url);

                let (_, mut read) = ws_stream.split();

                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            tracing::info!("Event stream listener stopping");
                            return Ok(());
                        }
                        frame = read.next() => match frame {
                            Some(Ok(Message::Text(text))) => {
                                event_tx.send(AppEvent::Frame(text.to_string())).await?;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                tracing::error!("Event stream error: {}", e);
                                delay = record_failure(&event_tx, &mut conn).await?;
                                break;
                            }
                            None => break,
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!("Event stream connect failed: {}", e);
                delay = record_failure(&event_tx, &mut conn).await?;
            }
        }

        // The transport is closed by now, whether or not an error was
        // seen first. Scheduling again is a no-op when the error path
        // already armed the timer, and then the closed status stays up
        // for the whole wait.
        conn.record_close();
        push_status(&event_tx, &conn).await?;
        if let Some(scheduled) = conn.schedule_reconnect() {
            delay = Some(scheduled);
            push_status(&event_tx, &conn).await?;
        }

        if let Some(delay) = delay {
            tracing::debug!("Reconnecting in {}ms", delay.as_millis());
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(delay) => {}
            }
            conn.timer_fired();
        }
    }
}

async fn record_failure(
    event_tx: &AsyncSender<AppEvent>,
    conn: &mut Connection,
) -> anyhow::Result<Option<Duration>> {
    conn.record_error();
    push_status(event_tx, conn).await?;

    let delay = conn.schedule_reconnect();
    if delay.is_some() {
        push_status(event_tx, conn).await?;
    }
    Ok(delay)
}

async fn push_status(
    event_tx: &AsyncSender<AppEvent>,
    conn: &Connection,
) -> anyhow::Result<()> {
    event_tx.send(AppEvent::Status(conn.status())).await?;
    Ok(())
}
