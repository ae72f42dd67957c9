use indexmap::IndexMap;

use crate::core::{SeriesId, ZoomCatalog};

use super::viewport_machine::ActiveFeed;
use super::{NavCapabilities, ViewportState, ViewportStateMachine};

impl ViewportStateMachine {
    pub(super) fn refresh_nav_capabilities(&mut self) {
        self.state.nav_capabilities = resolve_nav_capabilities(
            &self.state,
            &self.feeds,
            &self.config.catalog,
            self.active_preset.window_seconds,
        );
    }
}

/// Derives the capability flags for the current window.
///
/// Zoom flags probe the catalog relative to `anchor_window_seconds`, the
/// preset the window was last snapped to. Everything is `false` without feeds.
pub(super) fn resolve_nav_capabilities(
    state: &ViewportState,
    feeds: &IndexMap<SeriesId, ActiveFeed>,
    catalog: &ZoomCatalog,
    anchor_window_seconds: f64,
) -> NavCapabilities {
    if feeds.is_empty() {
        return NavCapabilities::default();
    }

    let earliest_start = feeds
        .values()
        .map(|feed| feed.info.start_time)
        .fold(f64::INFINITY, f64::min);
    let latest_end = feeds
        .values()
        .map(|feed| feed.info.end_time)
        .fold(f64::NEG_INFINITY, f64::max);
    let (window_start, window_end) = state.window_range();

    NavCapabilities {
        can_pan_back: window_start > earliest_start,
        can_pan_forward: window_end < latest_end,
        can_zoom_in: catalog.has_smaller_than(anchor_window_seconds),
        can_zoom_out: catalog.has_larger_than(anchor_window_seconds),
        can_go_to_start: go_to_start_target(window_start, feeds).is_some(),
        can_go_to_end: go_to_end_target(window_start, state.window_duration, feeds).is_some(),
    }
}

/// Earliest feed start among feeds whose start is not the current window start.
pub(super) fn go_to_start_target(
    window_start: f64,
    feeds: &IndexMap<SeriesId, ActiveFeed>,
) -> Option<f64> {
    feeds
        .values()
        .map(|feed| feed.info.start_time)
        .filter(|start| start.is_finite() && *start != window_start)
        .min_by(f64::total_cmp)
}

/// Latest `end - duration` among feeds whose end does not already close the window.
pub(super) fn go_to_end_target(
    window_start: f64,
    window_duration: f64,
    feeds: &IndexMap<SeriesId, ActiveFeed>,
) -> Option<f64> {
    feeds
        .values()
        .map(|feed| feed.info.end_time - window_duration)
        .filter(|start| start.is_finite() && *start != window_start)
        .max_by(f64::total_cmp)
}
