use tracing::{debug, trace};

use crate::core::{DataPoint, range_for_sides};
use crate::interaction::{DraftSelection, NavigationMode};

use super::{SubRange, ViewportStateMachine};

impl ViewportStateMachine {
    /// Records the raw drag span. Nothing else changes until a commit.
    pub fn set_draft_selection(&mut self, a: f64, b: f64) {
        trace!(a, b, "draft selection updated");
        self.state.selection = DraftSelection::new(a, b);
    }

    pub fn clear_draft_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Turns the drag span into the fetched window.
    ///
    /// The interval comes from the largest preset strictly smaller than the
    /// new duration. Degenerate drags, and any drag while no feed is active,
    /// only clear the draft.
    pub fn commit_reference_area_as_window_zoom(&mut self) {
        let Some((start, end)) = self.take_normalized_draft() else {
            return;
        };

        let duration = end - start;
        let preset = self.config.catalog.next_smaller(duration).clone();
        debug!(
            start,
            duration,
            preset = %preset.label,
            "reference area committed as window zoom"
        );

        self.state.window_start = start;
        self.state.window_duration = duration;
        self.state.interval_seconds = preset.interval_seconds;
        self.active_preset = preset;
        self.on_window_changed();
    }

    /// Zooms the axes onto the drag span over `points` without refetching.
    ///
    /// Switches to sub-range mode. The window is left untouched; sides with no
    /// data in the span keep their previous domain.
    pub fn commit_reference_area_as_sub_range_zoom(&mut self, points: &[DataPoint]) {
        let Some((start, end)) = self.take_normalized_draft() else {
            return;
        };

        let descriptors = self.descriptors();
        self.state.axis_domain = range_for_sides(
            &descriptors,
            points,
            start,
            end,
            self.state.axis_domain,
            self.config.axis_range,
        );
        self.state.sub_range = SubRange::new(start, end);
        self.state.is_sub_range_zoomed = true;
        self.mode = NavigationMode::SubRange;
        self.sub_range_seeded = true;
        debug!(
            start,
            end,
            axis_domain = ?self.state.axis_domain,
            "reference area committed as sub-range zoom"
        );
    }

    /// Sub-range commit against the rows merged from the last fetch.
    pub fn commit_reference_area_as_sub_range_zoom_on_loaded(&mut self) {
        let loaded = self.loaded.take();
        let points = loaded.as_ref().map_or(&[][..], |frame| frame.data.as_slice());
        self.commit_reference_area_as_sub_range_zoom(points);
        self.loaded = loaded;
    }

    /// Clears the draft and returns its ordered bounds when committable.
    ///
    /// Without active feeds every draft is dropped so the idle defaults stay
    /// in place for the first feed.
    fn take_normalized_draft(&mut self) -> Option<(f64, f64)> {
        let draft = self.state.selection;
        self.state.selection.clear();
        if self.feeds.is_empty() {
            trace!(?draft, "reference area ignored while idle");
            return None;
        }
        let normalized = draft.normalized();
        if normalized.is_none() {
            trace!(?draft, "degenerate reference area ignored");
        }
        normalized
    }
}
