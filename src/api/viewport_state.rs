use serde::{Deserialize, Serialize};

use crate::core::{AxisDomain, RangeBound, ZoomPreset};
use crate::interaction::DraftSelection;

/// Visual sub-range over the loaded rows. `Auto` bounds follow the data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubRange {
    pub left: RangeBound,
    pub right: RangeBound,
}

impl SubRange {
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            left: RangeBound::At(left),
            right: RangeBound::At(right),
        }
    }

    /// Both bounds when explicit.
    #[must_use]
    pub fn bounds(self) -> Option<(f64, f64)> {
        Some((self.left.value()?, self.right.value()?))
    }

    #[must_use]
    pub fn is_auto(self) -> bool {
        self.left.is_auto() && self.right.is_auto()
    }
}

/// Flags gating whether each navigation control is actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavCapabilities {
    pub can_pan_back: bool,
    pub can_pan_forward: bool,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub can_go_to_start: bool,
    pub can_go_to_end: bool,
}

/// Everything the rendering layer reads from the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Unset sentinel is `0`.
    pub window_start: f64,
    pub window_duration: f64,
    pub interval_seconds: f64,
    pub selection: DraftSelection,
    pub sub_range: SubRange,
    pub axis_domain: AxisDomain,
    pub nav_capabilities: NavCapabilities,
    pub is_sub_range_zoomed: bool,
}

impl ViewportState {
    /// State of a viewport with no feeds, sized by `preset`.
    #[must_use]
    pub fn idle(preset: &ZoomPreset) -> Self {
        Self {
            window_start: 0.0,
            window_duration: preset.window_seconds,
            interval_seconds: preset.interval_seconds,
            selection: DraftSelection::default(),
            sub_range: SubRange::default(),
            axis_domain: AxisDomain::default(),
            nav_capabilities: NavCapabilities::default(),
            is_sub_range_zoomed: false,
        }
    }

    #[must_use]
    pub fn window_end(&self) -> f64 {
        self.window_start + self.window_duration
    }

    #[must_use]
    pub fn window_range(&self) -> (f64, f64) {
        (self.window_start, self.window_end())
    }
}
