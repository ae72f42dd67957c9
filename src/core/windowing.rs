use crate::core::DataPoint;

/// Returns rows whose `date` falls inside an inclusive time window.
///
/// The bounds may be given in either order.
#[must_use]
pub fn points_in_time_window(points: &[DataPoint], start: f64, end: f64) -> Vec<&DataPoint> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    points
        .iter()
        .filter(|point| point.date >= min_t && point.date <= max_t)
        .collect()
}

/// Earliest and latest `date` among finite row timestamps.
#[must_use]
pub fn time_extent(points: &[DataPoint]) -> Option<(f64, f64)> {
    points
        .iter()
        .map(|point| point.date)
        .filter(|date| date.is_finite())
        .fold(None, |extent, date| match extent {
            None => Some((date, date)),
            Some((min, max)) => Some((f64::min(min, date), f64::max(max, date))),
        })
}
