use tracing::{debug, trace};

use crate::core::range_for_sides;
use crate::interaction::NavigationMode;

use super::nav_capabilities_resolver::{go_to_end_target, go_to_start_target};
use super::{PanStep, SubRange, ViewportStateMachine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Back,
    Forward,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Back => -1.0,
            Self::Forward => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zoom {
    In,
    Out,
}

impl ViewportStateMachine {
    pub fn pan_back(&mut self) {
        self.pan(Direction::Back);
    }

    pub fn pan_forward(&mut self) {
        self.pan(Direction::Forward);
    }

    /// Shrinks the window and snaps it to a smaller preset. Window mode only.
    pub fn zoom_in(&mut self) {
        self.zoom(Zoom::In);
    }

    /// Grows the window and snaps it to a larger preset. Window mode only.
    pub fn zoom_out(&mut self) {
        self.zoom(Zoom::Out);
    }

    /// Jumps the window to the earliest start among feeds not already there.
    pub fn go_to_start(&mut self) {
        if self.feeds.is_empty() || self.mode != NavigationMode::Window {
            return;
        }
        let Some(target) = go_to_start_target(self.state.window_start, &self.feeds) else {
            trace!("all feeds already at start");
            return;
        };
        self.state.window_start = target;
        self.state.selection.clear();
        self.on_window_changed();
    }

    /// Jumps the window so it closes on the latest feed end not already there.
    pub fn go_to_end(&mut self) {
        if self.feeds.is_empty() || self.mode != NavigationMode::Window {
            return;
        }
        let Some(target) =
            go_to_end_target(self.state.window_start, self.state.window_duration, &self.feeds)
        else {
            trace!("all feeds already at end");
            return;
        };
        self.state.window_start = target;
        self.state.selection.clear();
        self.on_window_changed();
    }

    /// Switches between window and sub-range navigation.
    ///
    /// Each mode keeps its own state across toggles. The first switch into
    /// sub-range mode seeds the sub-range with the current window.
    pub fn toggle_sub_range_mode(&mut self) {
        self.mode = self.mode.toggled();
        if self.mode == NavigationMode::SubRange && !self.sub_range_seeded {
            let (start, end) = self.state.window_range();
            self.state.sub_range = SubRange::new(start, end);
            self.sub_range_seeded = true;
        }
        debug!(mode = ?self.mode, "navigation mode toggled");
    }

    /// Sub-range mode: drops the visual zoom. Window mode: back to the default
    /// preset, anchored at the earliest feed start.
    pub fn reload(&mut self) {
        self.state.selection.clear();
        match self.mode {
            NavigationMode::SubRange => {
                self.state.sub_range = SubRange::default();
                self.state.axis_domain = Default::default();
                self.state.is_sub_range_zoomed = false;
                debug!("sub-range zoom cleared");
            }
            NavigationMode::Window => {
                self.state.window_start = self
                    .feeds
                    .values()
                    .map(|feed| feed.info.start_time)
                    .filter(|start| start.is_finite())
                    .min_by(f64::total_cmp)
                    .unwrap_or(0.0);
                self.state.window_duration = self.default_preset.window_seconds;
                self.state.interval_seconds = self.default_preset.interval_seconds;
                self.active_preset = self.default_preset.clone();
                self.on_window_changed();
            }
        }
    }

    fn pan(&mut self, direction: Direction) {
        if self.feeds.is_empty() {
            return;
        }
        match self.mode {
            NavigationMode::Window => self.pan_window(direction),
            NavigationMode::SubRange => self.pan_sub_range(direction),
        }
    }

    fn pan_window(&mut self, direction: Direction) {
        let step = match self.config.pan_step {
            PanStep::Fraction => (self.state.window_duration * self.config.move_fraction).round(),
            PanStep::PresetStep => self.active_preset.pan_step_seconds,
        };
        if !step.is_finite() || step <= 0.0 {
            return;
        }

        self.state.window_start += direction.sign() * step;
        self.state.selection.clear();
        self.on_window_changed();
    }

    fn pan_sub_range(&mut self, direction: Direction) {
        let (left, right) = self.resolved_sub_range();
        let span = right - left;
        if !span.is_finite() || span <= 0.0 {
            return;
        }
        let shift = (span * self.config.move_fraction).round();
        if shift <= 0.0 {
            return;
        }

        let left = left + direction.sign() * shift;
        let right = right + direction.sign() * shift;
        self.state.sub_range = SubRange::new(left, right);
        self.state.selection.clear();

        let descriptors = self.descriptors();
        if let Some(frame) = &self.loaded {
            self.state.axis_domain = range_for_sides(
                &descriptors,
                &frame.data,
                left,
                right,
                self.state.axis_domain,
                self.config.axis_range,
            );
        }
        debug!(left, right, "sub-range panned");
    }

    fn zoom(&mut self, direction: Zoom) {
        if self.feeds.is_empty() || self.mode != NavigationMode::Window {
            return;
        }

        let catalog = &self.config.catalog;
        let current = self.state.window_duration;
        let delta = (current * self.config.zoom_fraction).round();
        let target = match direction {
            Zoom::In => current - delta,
            Zoom::Out => current + delta,
        };
        let nearest = catalog.preset_for_exact_or_nearest_window(target);

        // The nearest preset may sit on the wrong side of the current window;
        // step one preset in the requested direction instead.
        let preset = match direction {
            Zoom::In if nearest.window_seconds < current => nearest,
            Zoom::In => catalog.next_smaller(current),
            Zoom::Out if nearest.window_seconds > current => nearest,
            Zoom::Out => catalog.next_larger(current),
        }
        .clone();

        let moved = match direction {
            Zoom::In => preset.window_seconds < current,
            Zoom::Out => preset.window_seconds > current,
        };
        if !moved {
            trace!(?direction, "zoom saturated at catalog end");
            self.refresh_nav_capabilities();
            return;
        }

        debug!(
            ?direction,
            from = current,
            to = preset.window_seconds,
            interval = preset.interval_seconds,
            "window zoomed"
        );
        self.state.window_duration = preset.window_seconds;
        self.state.interval_seconds = preset.interval_seconds;
        self.state.selection.clear();
        self.active_preset = preset;
        self.on_window_changed();
    }
}
