use kagami_types::{ContainerKind, TimeLabel};

/// Event kinds rendered replace-in-place. Each (section, kind) pair
/// owns at most one view node for the life of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplaceKind {
    DebugImage,
    RawText,
}

impl ReplaceKind {
    /// Mount point that hosts this kind's slots.
    pub fn container(self) -> ContainerKind {
        match self {
            ReplaceKind::DebugImage => ContainerKind::DebugImages,
            ReplaceKind::RawText => ContainerKind::RawTexts,
        }
    }
}

/// Payload handed to the injected templates, keyed by event kind.
#[derive(Debug)]
pub enum TemplateData<'a> {
    DebugImage {
        section: &'a str,
        /// Descriptor + "," + image reassembles the original data URI.
        format: &'a str,
        image: &'a str,
    },
    RawText {
        section: &'a str,
        text: &'a str,
        confidence: f64,
    },
    OutputText {
        section: &'a str,
        text: &'a str,
        /// Output entries bake their time into the fragment.
        time: &'a TimeLabel,
    },
}

/// Render functions supplied by the embedding frontend. Implementations
/// must be pure so that re-rendering a payload is always safe.
pub trait Templates: Send {
    /// Static section-labeled scaffold, rendered once when a slot is
    /// created.
    fn slot_shell(&self, kind: ReplaceKind, section: &str) -> String;

    /// Fragment for one event payload.
    fn fragment(&self, data: &TemplateData<'_>) -> String;
}

#[cfg(test)]
pub(crate) struct PlainTemplates;

#[cfg(test)]
impl Templates for PlainTemplates {
    fn slot_shell(&self, kind: ReplaceKind, section: &str) -> String {
        let kind = match kind {
            ReplaceKind::DebugImage => "image",
            ReplaceKind::RawText => "raw",
        };
        format!("== {} {} ==", kind, section)
    }

    fn fragment(&self, data: &TemplateData<'_>) -> String {
        match data {
            TemplateData::DebugImage { format, image, .. } => {
                format!("data:{},{}", format, image)
            }
            TemplateData::RawText { text, confidence, .. } => {
                format!("{} ({})", text, confidence)
            }
            TemplateData::OutputText { text, time, .. } => {
                format!("[{}] {}", time.canonical, text)
            }
        }
    }
}
