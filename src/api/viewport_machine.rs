use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AxisSide, FeedInfo, SeriesDescriptor, SeriesFrame, SeriesId, ZoomPreset, empty_placeholder,
    time_extent,
};
use crate::error::ChartResult;
use crate::interaction::NavigationMode;

use super::axis_label_format::format_tick_label;
use super::fetch_coordinator::FetchBatch;
use super::{ViewportConfig, ViewportState};

/// Feed currently plotted, with the extent reported by the feed catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFeed {
    pub info: FeedInfo,
    pub axis_side: AxisSide,
}

impl ActiveFeed {
    #[must_use]
    pub fn descriptor(&self) -> SeriesDescriptor {
        SeriesDescriptor {
            id: self.info.id.clone(),
            display_name: self.info.display_name.clone(),
            axis_side: self.axis_side,
        }
    }
}

/// Navigation, zoom and reference-area controller for one chart view.
///
/// Every transition is total: a gesture whose preconditions fail leaves the
/// state untouched. Owned by the view that displays the chart; share it across
/// threads only behind a single owner that serializes the calls.
pub struct ViewportStateMachine {
    pub(super) config: ViewportConfig,
    pub(super) default_preset: ZoomPreset,
    pub(super) active_preset: ZoomPreset,
    pub(super) state: ViewportState,
    pub(super) mode: NavigationMode,
    pub(super) feeds: IndexMap<SeriesId, ActiveFeed>,
    pub(super) sub_range_seeded: bool,
    pub(super) fetch: FetchBatch,
    pub(super) loaded: Option<SeriesFrame>,
}

impl ViewportStateMachine {
    /// Validates `config` and builds an idle viewport.
    pub fn new(config: ViewportConfig) -> ChartResult<Self> {
        config.validate()?;
        let default_preset = config.default_preset()?.clone();
        debug!(
            presets = config.catalog.presets().len(),
            default = %default_preset.label,
            "viewport state machine initialized"
        );

        Ok(Self {
            state: ViewportState::idle(&default_preset),
            active_preset: default_preset.clone(),
            default_preset,
            config,
            mode: NavigationMode::Window,
            feeds: IndexMap::new(),
            sub_range_seeded: false,
            fetch: FetchBatch::default(),
            loaded: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Preset the window was last snapped to.
    #[must_use]
    pub fn active_preset(&self) -> &ZoomPreset {
        &self.active_preset
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn active_feeds(&self) -> impl Iterator<Item = &ActiveFeed> {
        self.feeds.values()
    }

    #[must_use]
    pub fn feed(&self, id: &SeriesId) -> Option<&ActiveFeed> {
        self.feeds.get(id)
    }

    /// Registry of active series in insertion order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<SeriesDescriptor> {
        self.feeds.values().map(ActiveFeed::descriptor).collect()
    }

    #[must_use]
    pub fn loaded_frame(&self) -> Option<&SeriesFrame> {
        self.loaded.as_ref()
    }

    /// Frame to draw: the placeholder grid while idle, else the loaded rows.
    #[must_use]
    pub fn current_frame(&self) -> Cow<'_, SeriesFrame> {
        if self.is_idle() {
            return Cow::Owned(empty_placeholder(
                self.state.window_start,
                self.state.window_duration,
                self.state.interval_seconds,
            ));
        }
        match &self.loaded {
            Some(frame) => Cow::Borrowed(frame),
            None => Cow::Owned(SeriesFrame::default()),
        }
    }

    /// Time span currently on screen.
    ///
    /// In sub-range mode `Auto` bounds resolve to the loaded rows, falling
    /// back to the window when nothing is loaded.
    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        match self.mode {
            NavigationMode::Window => self.state.window_range(),
            NavigationMode::SubRange => self.resolved_sub_range(),
        }
    }

    /// Tick label for `timestamp` at the granularity of the visible span.
    #[must_use]
    pub fn tick_label(&self, timestamp: f64) -> String {
        let (start, end) = self.visible_range();
        format_tick_label(
            timestamp,
            end - start,
            self.config.tick_label_utc_offset_seconds,
        )
    }

    pub(super) fn resolved_sub_range(&self) -> (f64, f64) {
        if let Some(bounds) = self.state.sub_range.bounds() {
            return bounds;
        }
        let extent = self
            .loaded
            .as_ref()
            .and_then(|frame| time_extent(&frame.data))
            .unwrap_or_else(|| self.state.window_range());
        (
            self.state.sub_range.left.value().unwrap_or(extent.0),
            self.state.sub_range.right.value().unwrap_or(extent.1),
        )
    }

    pub(super) fn reset_to_idle(&mut self) {
        self.state = ViewportState::idle(&self.default_preset);
        self.active_preset = self.default_preset.clone();
        self.mode = NavigationMode::Window;
        self.sub_range_seeded = false;
        self.fetch.clear();
        self.loaded = None;
        debug!("viewport reset to idle");
    }

    /// Bookkeeping after any change of the fetched window.
    pub(super) fn on_window_changed(&mut self) {
        self.invalidate_fetches();
        self.refresh_nav_capabilities();
        debug!(
            window_start = self.state.window_start,
            window_duration = self.state.window_duration,
            interval_seconds = self.state.interval_seconds,
            "viewport window changed"
        );
    }
}
