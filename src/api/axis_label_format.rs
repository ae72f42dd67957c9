use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 365.0 * DAY;

/// Time-axis label granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickLabelPattern {
    /// `14:05:09`, spans under an hour.
    TimeSecond,
    /// `14:05`, spans up to a few days.
    TimeMinute,
    /// `Mar 07`, spans up to a year.
    MonthDay,
    /// `Mar 2024`, a year and beyond.
    MonthYear,
}

impl TickLabelPattern {
    fn format_str(self) -> &'static str {
        match self {
            Self::TimeSecond => "%H:%M:%S",
            Self::TimeMinute => "%H:%M",
            Self::MonthDay => "%b %d",
            Self::MonthYear => "%b %Y",
        }
    }
}

#[must_use]
pub fn resolve_tick_label_pattern(visible_span: f64) -> TickLabelPattern {
    let span = visible_span.abs();
    if span < HOUR {
        TickLabelPattern::TimeSecond
    } else if span < 3.0 * DAY {
        TickLabelPattern::TimeMinute
    } else if span < YEAR {
        TickLabelPattern::MonthDay
    } else {
        TickLabelPattern::MonthYear
    }
}

/// Formats a Unix-seconds tick for a chart showing `visible_span` seconds.
///
/// Timestamps chrono cannot represent fall back to their decimal value.
#[must_use]
pub fn format_tick_label(timestamp: f64, visible_span: f64, utc_offset_seconds: i32) -> String {
    if !timestamp.is_finite() {
        return "nan".to_owned();
    }

    let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp.round() as i64, 0) else {
        return format!("{timestamp:.0}");
    };
    let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| Utc.fix());
    utc.with_timezone(&offset)
        .format(resolve_tick_label_pattern(visible_span).format_str())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{TickLabelPattern, format_tick_label, resolve_tick_label_pattern};

    // 2024-03-07T14:05:09Z
    const TS: f64 = 1_709_820_309.0;

    #[test]
    fn granularity_scales_with_span() {
        assert_eq!(resolve_tick_label_pattern(900.0), TickLabelPattern::TimeSecond);
        assert_eq!(resolve_tick_label_pattern(86_400.0), TickLabelPattern::TimeMinute);
        assert_eq!(resolve_tick_label_pattern(2_592_000.0), TickLabelPattern::MonthDay);
        assert_eq!(resolve_tick_label_pattern(63_072_000.0), TickLabelPattern::MonthYear);
    }

    #[test]
    fn formats_each_granularity() {
        assert_eq!(format_tick_label(TS, 900.0, 0), "14:05:09");
        assert_eq!(format_tick_label(TS, 86_400.0, 0), "14:05");
        assert_eq!(format_tick_label(TS, 2_592_000.0, 0), "Mar 07");
        assert_eq!(format_tick_label(TS, 63_072_000.0, 0), "Mar 2024");
    }

    #[test]
    fn applies_utc_offset() {
        assert_eq!(format_tick_label(TS, 86_400.0, 3_600), "15:05");
        assert_eq!(format_tick_label(f64::NAN, 86_400.0, 0), "nan");
    }
}
