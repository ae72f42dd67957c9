use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::primitives::round_half_away_from_zero;
use crate::core::windowing::points_in_time_window;
use crate::core::{AxisSide, DataPoint, RangeBound, SeriesDescriptor, SeriesId};
use crate::error::{ChartError, ChartResult};

/// Tuning controls for Y-axis auto-ranging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRangeTuning {
    /// Fraction of the raw span added above the max and below the min.
    pub padding_ratio: f64,
    /// Span forced when every value on a side is identical.
    pub min_span: f64,
    pub rounding_decimals: u32,
}

impl Default for AxisRangeTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.05,
            min_span: 1.0,
            rounding_decimals: 3,
        }
    }
}

impl AxisRangeTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "axis padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_span.is_finite() || self.min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis min span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Per-side Y domain handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisDomain {
    pub top_left: RangeBound,
    pub bottom_left: RangeBound,
    pub top_right: RangeBound,
    pub bottom_right: RangeBound,
}

impl AxisDomain {
    /// `(bottom, top)` for one side.
    #[must_use]
    pub fn side(self, side: AxisSide) -> (RangeBound, RangeBound) {
        match side {
            AxisSide::Left => (self.bottom_left, self.top_left),
            AxisSide::Right => (self.bottom_right, self.top_right),
        }
    }

    fn set_side(&mut self, side: AxisSide, bottom: f64, top: f64) {
        match side {
            AxisSide::Left => {
                self.bottom_left = RangeBound::At(bottom);
                self.top_left = RangeBound::At(top);
            }
            AxisSide::Right => {
                self.bottom_right = RangeBound::At(bottom);
                self.top_right = RangeBound::At(top);
            }
        }
    }
}

/// Min/max of the finite values of `series_key` among rows dated inside
/// `[from, to]`. `None` when the window is empty or holds no usable value.
#[must_use]
pub fn domain_for(
    points: &[DataPoint],
    from: f64,
    to: f64,
    series_key: &SeriesId,
) -> Option<(f64, f64)> {
    points_in_time_window(points, from, to)
        .into_iter()
        .filter_map(|point| point.value(series_key))
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

/// Recomputes the axis domain of both sides over `[from, to]`.
///
/// A side with no data keeps its value from `previous`.
#[must_use]
pub fn range_for_sides(
    series: &[SeriesDescriptor],
    points: &[DataPoint],
    from: f64,
    to: f64,
    previous: AxisDomain,
    tuning: AxisRangeTuning,
) -> AxisDomain {
    let mut domain = previous;

    for side in AxisSide::ALL {
        let ranges: SmallVec<[(f64, f64); 4]> = series
            .iter()
            .filter(|descriptor| descriptor.axis_side == side)
            .filter_map(|descriptor| domain_for(points, from, to, &descriptor.id))
            .collect();

        let Some((raw_min, raw_max)) = ranges.iter().copied().reduce(|(lo, hi), (min, max)| {
            (f64::min(lo, min), f64::max(hi, max))
        }) else {
            trace!(?side, "axis side has no data in range, keeping previous domain");
            continue;
        };

        let (bottom, top) = padded_bounds(raw_min, raw_max, tuning);
        trace!(?side, raw_min, raw_max, bottom, top, "axis side re-ranged");
        domain.set_side(side, bottom, top);
    }

    domain
}

fn padded_bounds(raw_min: f64, raw_max: f64, tuning: AxisRangeTuning) -> (f64, f64) {
    let dp = tuning.rounding_decimals;
    let span = raw_max - raw_min;
    let padding = if span > 0.0 {
        span * tuning.padding_ratio
    } else {
        tuning.min_span * 0.5
    };

    let bottom = round_half_away_from_zero(raw_min - padding, dp);
    let top = round_half_away_from_zero(raw_max + padding, dp);
    if top > bottom {
        return (bottom, top);
    }

    // Padding vanished under rounding; fall back to the forced span.
    let mid = (raw_min + raw_max) * 0.5;
    let half = tuning.min_span * 0.5;
    (
        round_half_away_from_zero(mid - half, dp),
        round_half_away_from_zero(mid + half, dp),
    )
}
