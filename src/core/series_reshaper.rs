use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::sample::{ParsedSamples, parse_tuples};
use crate::core::{AxisSide, DataPoint, Sample, SeriesDescriptor, SeriesId, SeriesValue};

/// Display name of the synthetic series used when nothing is selected.
pub const PLACEHOLDER_SERIES_NAME: &str = "null";

/// Rows produced from a single feed plus its registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ReshapedSeries {
    pub points: Vec<DataPoint>,
    pub descriptor: SeriesDescriptor,
    /// Malformed tuples dropped while parsing this feed.
    pub skipped: usize,
}

/// Chart-ready structure: all rows and the series registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub data: Vec<DataPoint>,
    pub feeds: Vec<SeriesDescriptor>,
    #[serde(default)]
    pub skipped: usize,
}

impl SeriesFrame {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.feeds.is_empty()
    }

    /// Drops every trace of `id`; rows left without series are removed.
    pub fn remove_series(&mut self, id: &SeriesId) {
        self.feeds.retain(|descriptor| &descriptor.id != id);
        self.data.retain_mut(|point| {
            point.series.shift_remove(id);
            !point.series.is_empty()
        });
    }
}

/// Converts one feed's samples into keyed rows.
#[must_use]
pub fn reshape(descriptor: SeriesDescriptor, parsed: &ParsedSamples) -> ReshapedSeries {
    let points = parsed
        .samples
        .iter()
        .map(|sample| row_for_sample(&descriptor.id, *sample))
        .collect();

    if parsed.skipped > 0 {
        warn!(
            feed = %descriptor.id,
            skipped = parsed.skipped,
            "dropped malformed feed samples"
        );
    }

    ReshapedSeries {
        points,
        descriptor,
        skipped: parsed.skipped,
    }
}

/// Parses positional tuples and reshapes them in one go.
#[must_use]
pub fn reshape_tuples<T>(descriptor: SeriesDescriptor, tuples: &[T]) -> ReshapedSeries
where
    T: AsRef<[Option<f64>]>,
{
    reshape(descriptor, &parse_tuples(tuples))
}

/// Reshapes a batch of feeds, preserving input order.
#[cfg(not(feature = "parallel-reshape"))]
#[must_use]
pub fn reshape_all(inputs: Vec<(SeriesDescriptor, ParsedSamples)>) -> Vec<ReshapedSeries> {
    inputs
        .into_iter()
        .map(|(descriptor, parsed)| reshape(descriptor, &parsed))
        .collect()
}

/// Reshapes a batch of feeds on the rayon pool, preserving input order.
#[cfg(feature = "parallel-reshape")]
#[must_use]
pub fn reshape_all(inputs: Vec<(SeriesDescriptor, ParsedSamples)>) -> Vec<ReshapedSeries> {
    use rayon::prelude::*;

    inputs
        .into_par_iter()
        .map(|(descriptor, parsed)| reshape(descriptor, &parsed))
        .collect()
}

/// Concatenates reshaped feeds: left-side feeds first, then right-side ones,
/// each group in caller order. Rows are neither sorted nor deduplicated.
#[must_use]
pub fn merge(results: Vec<ReshapedSeries>) -> SeriesFrame {
    let (left, right): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|result| result.descriptor.axis_side == AxisSide::Left);

    let mut frame = SeriesFrame {
        data: Vec::with_capacity(
            left.iter()
                .chain(right.iter())
                .map(|result| result.points.len())
                .sum(),
        ),
        feeds: Vec::with_capacity(left.len() + right.len()),
        skipped: 0,
    };

    for result in left.into_iter().chain(right) {
        frame.skipped += result.skipped;
        frame.data.extend(result.points);
        frame.feeds.push(result.descriptor);
    }

    debug!(
        feeds = frame.feeds.len(),
        rows = frame.data.len(),
        skipped = frame.skipped,
        "merged feed results"
    );
    frame
}

/// Empty grid shown while no feed is selected.
///
/// Emits `ceil(window_duration / interval_seconds)` rows with a null value
/// under series `0`. Non-positive or non-finite inputs yield an empty frame.
#[must_use]
pub fn empty_placeholder(
    window_start: f64,
    window_duration: f64,
    interval_seconds: f64,
) -> SeriesFrame {
    if !window_start.is_finite()
        || !window_duration.is_finite()
        || !interval_seconds.is_finite()
        || window_duration <= 0.0
        || interval_seconds <= 0.0
    {
        return SeriesFrame::default();
    }

    let placeholder_id = SeriesId::Numeric(0);
    let count = (window_duration / interval_seconds).ceil() as usize;
    let data = (0..count)
        .map(|k| {
            DataPoint::new(window_start + k as f64 * interval_seconds)
                .with_series(placeholder_id.clone(), SeriesValue::scalar(None))
        })
        .collect();

    SeriesFrame {
        data,
        feeds: vec![SeriesDescriptor::new(
            placeholder_id,
            PLACEHOLDER_SERIES_NAME,
            AxisSide::Left,
        )],
        skipped: 0,
    }
}

fn row_for_sample(id: &SeriesId, sample: Sample) -> DataPoint {
    let value = match sample {
        Sample::Scalar { value, .. } => SeriesValue::scalar(value),
        Sample::Banded { value, .. } => SeriesValue::banded(value, sample.envelope()),
    };
    DataPoint::new(sample.time()).with_series(id.clone(), value)
}

#[cfg(test)]
mod tests {
    use super::{empty_placeholder, merge, reshape_tuples};
    use crate::core::{AxisSide, SeriesDescriptor, SeriesId};

    #[test]
    fn merge_puts_left_series_first() {
        let right = reshape_tuples(
            SeriesDescriptor::new(2u64, "right", AxisSide::Right),
            &[vec![Some(1.0), Some(5.0)]],
        );
        let left = reshape_tuples(
            SeriesDescriptor::new(1u64, "left", AxisSide::Left),
            &[vec![Some(1.0), Some(3.0)], vec![Some(2.0)]],
        );

        let frame = merge(vec![right, left]);
        assert_eq!(frame.feeds[0].id, SeriesId::Numeric(1));
        assert_eq!(frame.feeds[1].id, SeriesId::Numeric(2));
        assert_eq!(frame.data.len(), 2);
        assert!(frame.data[0].contains(&SeriesId::Numeric(1)));
        assert_eq!(frame.skipped, 1);
    }

    #[test]
    fn placeholder_rejects_non_positive_inputs() {
        assert!(empty_placeholder(0.0, 0.0, 10.0).is_empty());
        assert!(empty_placeholder(0.0, 100.0, 0.0).is_empty());
        assert!(empty_placeholder(0.0, -5.0, 10.0).is_empty());
    }

    #[test]
    fn removing_series_prunes_rows() {
        let a = reshape_tuples(
            SeriesDescriptor::new(1u64, "a", AxisSide::Left),
            &[vec![Some(1.0), Some(3.0)]],
        );
        let b = reshape_tuples(
            SeriesDescriptor::new(2u64, "b", AxisSide::Left),
            &[vec![Some(1.0), Some(4.0)]],
        );
        let mut frame = merge(vec![a, b]);
        frame.remove_series(&SeriesId::Numeric(1));
        assert_eq!(frame.feeds.len(), 1);
        assert_eq!(frame.data.len(), 1);
        assert_eq!(frame.data[0].value(&SeriesId::Numeric(2)), Some(4.0));
    }
}
