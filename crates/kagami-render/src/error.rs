/// Failures while decoding and applying a single frame. Never fatal:
/// the event loop reports the frame and moves on to the next one.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(f64),
}
