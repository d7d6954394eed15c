use chrono::{DateTime, Local, TimeZone, Utc};
use kagami_types::TimeLabel;

use crate::error::DispatchError;

/// Format an epoch-seconds timestamp for display.
///
/// The canonical form is UTC ISO-8601 with millisecond precision, e.g.
/// `2023-01-02T03:04:05.678Z`; the display form appends the viewer's
/// local time in parentheses. Backends emit fractional seconds, so
/// sub-second precision survives formatting.
pub fn format_timestamps(epoch_secs: f64) -> Result<TimeLabel, DispatchError> {
    if !epoch_secs.is_finite() {
        return Err(DispatchError::InvalidTimestamp(epoch_secs));
    }

    let millis = (epoch_secs * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(DispatchError::InvalidTimestamp(epoch_secs));
    }

    let utc: DateTime<Utc> = match Utc.timestamp_millis_opt(millis as i64) {
        chrono::LocalResult::Single(dt) => dt,
        _ => return Err(DispatchError::InvalidTimestamp(epoch_secs)),
    };

    let canonical = utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
    let local = utc.with_timezone(&Local);
    let display = format!("{} ({})", canonical, local.format("%Y-%m-%d %H:%M:%S"));

    Ok(TimeLabel { canonical, display })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_is_utc_iso() {
        let label = format_timestamps(0.0).expect("epoch formats");
        assert_eq!(label.canonical, "1970-01-01T00:00:00.000Z");

        let label = format_timestamps(1000.0).expect("formats");
        assert_eq!(label.canonical, "1970-01-01T00:16:40.000Z");
    }

    #[test]
    fn test_fractional_seconds_survive() {
        let label = format_timestamps(0.5).expect("formats");
        assert_eq!(label.canonical, "1970-01-01T00:00:00.500Z");

        let label = format_timestamps(1000.25).expect("formats");
        assert_eq!(label.canonical, "1970-01-01T00:16:40.250Z");
    }

    #[test]
    fn test_display_wraps_canonical_with_local_time() {
        let label = format_timestamps(1234.0).expect("formats");
        assert!(label.display.starts_with(&label.canonical));
        assert!(label.display.contains(" ("));
        assert!(label.display.ends_with(')'));
    }

    #[test]
    fn test_pre_epoch_timestamps_format() {
        let label = format_timestamps(-1.0).expect("formats");
        assert_eq!(label.canonical, "1969-12-31T23:59:59.000Z");
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match format_timestamps(bad) {
                Err(DispatchError::InvalidTimestamp(_)) => {}
                other => panic!("expected InvalidTimestamp for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_absurd_magnitude_rejected() {
        match format_timestamps(1e300) {
            Err(DispatchError::InvalidTimestamp(_)) => {}
            other => panic!("expected InvalidTimestamp, got {:?}", other),
        }
    }
}
