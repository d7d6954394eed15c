use serde::Deserialize;

/// Wire event published by the recognition backend over the event
/// stream. The `type` field selects the variant; tags this client does
/// not know decode to [`StreamEvent::Unknown`] so newer backends keep
/// working against older dashboards.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    /// Intermediate frame snapshot for one capture section.
    #[serde(rename = "debug_image")]
    DebugImage {
        #[serde(default)]
        section: Option<String>,
        /// Seconds since the Unix epoch, fractional part allowed.
        timestamp: f64,
        /// MIME-ish descriptor, e.g. `image/png;base64`.
        format: String,
        /// Base64 payload body.
        image: String,
    },

    /// Latest recognizer guess for one capture section.
    #[serde(rename = "raw_text")]
    RawText {
        #[serde(default)]
        section: Option<String>,
        timestamp: f64,
        text: String,
        confidence: f64,
    },

    /// Finalized text committed by the recognizer.
    #[serde(rename = "output_text")]
    OutputText {
        #[serde(default)]
        section: Option<String>,
        timestamp: f64,
        text: String,
    },

    #[serde(other)]
    Unknown,
}

/// Section label as the dashboard shows it. The backend may omit the
/// section or send an explicit null; both render as the literal "null"
/// label and share one slot per event kind.
pub fn section_label(section: Option<&str>) -> &str {
    section.unwrap_or("null")
}

/// Connection lifecycle states of the single event-stream socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Error,
    Disconnected,
    WaitingToReconnect,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Connecting => "Connecting...",
            Self::Connected => "Connected",
            Self::Error => "Connection error",
            Self::Disconnected => "Disconnected",
            Self::WaitingToReconnect => "Waiting for reconnect...",
        };
        f.write_str(text)
    }
}

/// Formatted timestamps for one rendered event.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLabel {
    /// UTC ISO-8601 with millisecond precision, machine sortable.
    pub canonical: String,
    /// Canonical form plus the viewer's local time in parentheses.
    pub display: String,
}

/// The three event mount points of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    DebugImages,
    RawTexts,
    OutputTexts,
}

impl ContainerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::DebugImages => "debug_images",
            Self::RawTexts => "raw_texts",
            Self::OutputTexts => "output_texts",
        }
    }
}

/// View delta produced by dispatching one event.
#[derive(Debug, Clone)]
pub struct RenderUpdate {
    pub container: ContainerKind,
    /// Node the delta applies to.
    pub node: u64,
    /// True when this dispatch allocated the node.
    pub created: bool,
    pub section: Option<String>,
    /// Section-labeled scaffold, non-empty only when a slot was created.
    pub shell: String,
    /// Rendered payload fragment.
    pub body: String,
    pub time: Option<TimeLabel>,
    /// Output-log entry evicted to hold the cap, if any.
    pub evicted: Option<u64>,
}

/// Messages from the event sources into the app loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// One raw wire frame, from the live socket or the snapshot replay.
    Frame(String),
    Status(ConnectionStatus),
}

/// Messages from the app loop out to the presenter.
#[derive(Debug, Clone)]
pub enum ViewCommand {
    SetStatus(String),
    Apply(RenderUpdate),
}
