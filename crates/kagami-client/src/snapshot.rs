use kagami_types::AppEvent;
use kanal::AsyncSender;
use serde::Deserialize;

/// Snapshot payload served by the dashboard backend.
#[derive(Deserialize)]
struct RecentResponse {
    recent_texts: Vec<serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Event channel closed")]
    ChannelClosed,
}

/// Fetch the recent-events snapshot once and replay each item through
/// the same frame path live events take, oldest first. No retry here:
/// if the snapshot fails, the live stream is the recovery path.
pub async fn load_recent(
    client: &reqwest::Client,
    url: &str,
    event_tx: &AsyncSender<AppEvent>,
) -> Result<usize, SnapshotError> {
    let response: RecentResponse = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let count = response.recent_texts.len();
    for item in response.recent_texts {
        event_tx
            .send(AppEvent::Frame(item.to_string()))
            .await
            .map_err(|_| SnapshotError::ChannelClosed)?;
    }

    Ok(count)
}
