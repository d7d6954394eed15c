use kagami_render::template::{ReplaceKind, TemplateData, Templates};

/// Plain-text render functions for the terminal frontend. A richer
/// frontend would swap in its own markup; the dispatch core only ever
/// sees the trait.
pub struct TextTemplates;

impl Templates for TextTemplates {
    fn slot_shell(&self, kind: ReplaceKind, section: &str) -> String {
        match kind {
            ReplaceKind::DebugImage => format!("-- debug image [{}] --", section),
            ReplaceKind::RawText => format!("-- raw text [{}] --", section),
        }
    }

    fn fragment(&self, data: &TemplateData<'_>) -> String {
        match data {
            TemplateData::DebugImage { format, image, .. } => {
                // The blob itself is useless in a terminal; size is not.
                format!("<{}, {} base64 bytes>", format, image.len())
            }
            TemplateData::RawText { text, confidence, .. } => {
                format!("{}  (confidence {})", text, format_confidence(*confidence))
            }
            TemplateData::OutputText { text, time, .. } => {
                format!("[{}] {}", time.canonical, text)
            }
        }
    }
}

/// Confidence prints the way the wire number reads: integral values
/// without a decimal point.
fn format_confidence(confidence: f64) -> String {
    if confidence.is_finite() && confidence.fract() == 0.0 && confidence.abs() < 1e15 {
        format!("{}", confidence as i64)
    } else {
        format!("{}", confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kagami_types::TimeLabel;

    #[test]
    fn test_confidence_prints_like_the_wire_number() {
        assert_eq!(format_confidence(100.0), "100");
        assert_eq!(format_confidence(87.0), "87");
        assert_eq!(format_confidence(0.95), "0.95");
        assert_eq!(format_confidence(-3.5), "-3.5");
    }

    #[test]
    fn test_output_fragment_bakes_the_time_in() {
        let time = TimeLabel {
            canonical: "1970-01-01T00:16:40.000Z".to_string(),
            display: "1970-01-01T00:16:40.000Z (local)".to_string(),
        };
        let data = TemplateData::OutputText {
            section: "P1",
            text: "done",
            time: &time,
        };

        let fragment = TextTemplates.fragment(&data);
        assert_eq!(fragment, "[1970-01-01T00:16:40.000Z] done");
    }

    #[test]
    fn test_shell_carries_the_section_label() {
        let shell = TextTemplates.slot_shell(ReplaceKind::RawText, "null");
        assert!(shell.contains("[null]"));
    }
}
