use kagami_types::{RenderUpdate, StreamEvent, section_label};

use crate::error::DispatchError;
use crate::state::RenderState;
use crate::template::{ReplaceKind, TemplateData};
use crate::timestamp::format_timestamps;

/// Decodes wire frames and routes them into the render state. Every
/// frame, live or replayed, flows through here in arrival order.
pub struct Dispatcher {
    state: RenderState,
}

impl Dispatcher {
    pub fn new(state: RenderState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    /// Decode one frame and apply it. `Ok(None)` means the frame was a
    /// kind this client does not know and was skipped. Errors describe
    /// the frame only; the stream itself stays up.
    pub fn dispatch(&mut self, raw: &str) -> Result<Option<RenderUpdate>, DispatchError> {
        let event: StreamEvent = serde_json::from_str(raw)?;

        let update = match &event {
            StreamEvent::DebugImage {
                section,
                timestamp,
                format,
                image,
            } => {
                let time = format_timestamps(*timestamp)?;
                let section = section_label(section.as_deref());
                let data = TemplateData::DebugImage {
                    section,
                    format,
                    image,
                };
                self.state
                    .upsert_replace(section, ReplaceKind::DebugImage, &data, time)
            }
            StreamEvent::RawText {
                section,
                timestamp,
                text,
                confidence,
            } => {
                let time = format_timestamps(*timestamp)?;
                let section = section_label(section.as_deref());
                let data = TemplateData::RawText {
                    section,
                    text,
                    confidence: *confidence,
                };
                self.state
                    .upsert_replace(section, ReplaceKind::RawText, &data, time)
            }
            StreamEvent::OutputText {
                section,
                timestamp,
                text,
            } => {
                let time = format_timestamps(*timestamp)?;
                let section = section_label(section.as_deref());
                let data = TemplateData::OutputText {
                    section,
                    text,
                    time: &time,
                };
                self.state.append_output(section, &data, time.clone())
            }
            StreamEvent::Unknown => {
                tracing::trace!("skipping unknown event kind");
                return Ok(None);
            }
        };

        Ok(Some(update))
    }
}
