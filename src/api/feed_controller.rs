use tracing::debug;

use crate::core::{AxisSide, FeedInfo, SeriesId};

use super::ViewportStateMachine;
use super::viewport_machine::ActiveFeed;

impl ViewportStateMachine {
    /// Adds a feed to the plotted set.
    ///
    /// The first feed seeds `window_start` from its start time unless the
    /// window was already positioned. Re-adding an active id is a no-op.
    pub fn add_feed(&mut self, info: FeedInfo, axis_side: AxisSide) {
        if self.feeds.contains_key(&info.id) {
            debug!(feed = %info.id, "feed already active, ignoring add");
            return;
        }

        if self.feeds.is_empty() && self.state.window_start == 0.0 && info.start_time.is_finite() {
            self.state.window_start = info.start_time;
        }

        debug!(
            feed = %info.id,
            ?axis_side,
            start_time = info.start_time,
            end_time = info.end_time,
            "feed added"
        );
        self.feeds
            .insert(info.id.clone(), ActiveFeed { info, axis_side });
        self.on_window_changed();
    }

    /// Removes a feed; removing the last one returns the viewport to idle.
    ///
    /// Returns `false` when `id` was not active.
    pub fn remove_feed(&mut self, id: &SeriesId) -> bool {
        if self.feeds.shift_remove(id).is_none() {
            return false;
        }
        debug!(feed = %id, remaining = self.feeds.len(), "feed removed");

        if self.feeds.is_empty() {
            self.reset_to_idle();
            return true;
        }

        if let Some(frame) = self.loaded.as_mut() {
            frame.remove_series(id);
        }
        self.fetch.remove(id);
        self.try_complete_fetch();
        self.refresh_nav_capabilities();
        true
    }
}
